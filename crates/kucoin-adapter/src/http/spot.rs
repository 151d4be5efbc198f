/*
[INPUT]:  Typed spot requests, filters and page selection
[OUTPUT]: Symbols, balances, orders and fills from the spot host
[POS]:    HTTP layer - spot endpoints
[UPDATE]: When adding spot endpoints or changing their parameters
*/

use tracing::debug;
use uuid::Uuid;

use crate::http::request::{PageRequest, Params, RequestDescriptor};
use crate::http::router::{
    SPOT_ACCOUNTS, SPOT_CANCEL_ORDER, SPOT_FILLS, SPOT_ORDER, SPOT_ORDERS, SPOT_PLACE_MARGIN_ORDER,
    SPOT_PLACE_ORDER, SPOT_SYMBOLS,
};
use crate::http::{KucoinClient, Result};
use crate::types::{
    Account, AccountType, CancelledOrders, Fill, MarginOrderPlaced, MarginOrderRequest,
    OrderPlaced, Paginated, SpotFillsQuery, SpotOrder, SpotOrderRequest, SpotOrdersQuery,
    SymbolInfo,
};

impl KucoinClient {
    /// List spot trading pairs, optionally for one market (e.g. "USDS")
    ///
    /// GET /api/v2/symbols
    pub async fn spot_symbols(&self, market: Option<&str>) -> Result<Vec<SymbolInfo>> {
        let mut params = Params::new();
        params.insert_opt("market", market);
        self.execute(RequestDescriptor::with_query(SPOT_SYMBOLS.route()?, params)?)
            .await
    }

    /// GET /api/v1/accounts
    pub async fn accounts(
        &self,
        currency: Option<&str>,
        account_type: Option<AccountType>,
    ) -> Result<Vec<Account>> {
        let mut params = Params::new();
        params
            .insert_opt("currency", currency)
            .insert_opt("type", account_type);
        self.execute(RequestDescriptor::with_query(SPOT_ACCOUNTS.route()?, params)?)
            .await
    }

    /// Place a spot order; a missing `client_oid` is generated
    ///
    /// POST /api/v1/orders
    pub async fn place_spot_order(&self, mut order: SpotOrderRequest) -> Result<OrderPlaced> {
        ensure_client_oid(&mut order.client_oid);
        self.execute(RequestDescriptor::with_json(SPOT_PLACE_ORDER.route()?, &order)?)
            .await
    }

    /// Place a cross or isolated margin order; a missing `client_oid` is generated
    ///
    /// POST /api/v1/margin/order
    pub async fn place_margin_order(
        &self,
        mut order: MarginOrderRequest,
    ) -> Result<MarginOrderPlaced> {
        ensure_client_oid(&mut order.order.client_oid);
        self.execute(RequestDescriptor::with_json(
            SPOT_PLACE_MARGIN_ORDER.route()?,
            &order,
        )?)
        .await
    }

    /// GET /api/v1/fills
    pub async fn spot_fills(
        &self,
        query: &SpotFillsQuery,
        page: PageRequest,
    ) -> Result<Paginated<Fill>> {
        let mut params = query.to_params();
        params.insert_page(page);
        self.execute(RequestDescriptor::with_query(SPOT_FILLS.route()?, params)?)
            .await
    }

    /// DELETE /api/v1/orders/{orderId}
    pub async fn cancel_spot_order(&self, order_id: &str) -> Result<CancelledOrders> {
        let route = SPOT_CANCEL_ORDER.route_with(&[("orderId", order_id)])?;
        self.execute(RequestDescriptor::new(route)).await
    }

    /// GET /api/v1/orders
    pub async fn spot_orders(
        &self,
        query: &SpotOrdersQuery,
        page: PageRequest,
    ) -> Result<Paginated<SpotOrder>> {
        let mut params = query.to_params();
        params.insert_page(page);
        self.execute(RequestDescriptor::with_query(SPOT_ORDERS.route()?, params)?)
            .await
    }

    /// GET /api/v1/orders/{orderId}
    pub async fn spot_order(&self, order_id: &str) -> Result<SpotOrder> {
        let route = SPOT_ORDER.route_with(&[("orderId", order_id)])?;
        self.execute(RequestDescriptor::new(route)).await
    }
}

/// The venue requires a client order id on every placement
pub(crate) fn ensure_client_oid(client_oid: &mut Option<String>) {
    if client_oid.as_deref().is_none_or(str::is_empty) {
        let generated = Uuid::new_v4().simple().to_string();
        debug!(client_oid = %generated, "generated client order id");
        *client_oid = Some(generated);
    }
}
