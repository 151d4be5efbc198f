/*
[INPUT]:  Typed futures requests, filters and page selection
[OUTPUT]: Account overview, orders, fills, positions and contracts
[POS]:    HTTP layer - futures endpoints
[UPDATE]: When adding futures endpoints or changing their parameters
*/

use crate::http::request::{PageRequest, Params, RequestDescriptor};
use crate::http::router::{
    FUTURES_ACCOUNT, FUTURES_CANCEL_ORDER, FUTURES_CONTRACTS, FUTURES_FILLS, FUTURES_ORDER,
    FUTURES_ORDERS, FUTURES_PLACE_ORDER, FUTURES_POSITION, FUTURES_POSITIONS,
};
use crate::http::spot::ensure_client_oid;
use crate::http::{KucoinClient, KucoinError, Result};
use crate::types::{
    CancelledOrders, ContractInfo, FuturesAccount, FuturesFill, FuturesFillsQuery, FuturesOrder,
    FuturesOrderRequest, FuturesOrdersQuery, FuturesPosition, OrderPlaced, Paginated,
};

impl KucoinClient {
    /// Account overview, in the given settlement currency (default XBT)
    ///
    /// GET /api/v1/account-overview
    pub async fn futures_account(&self, currency: Option<&str>) -> Result<FuturesAccount> {
        let mut params = Params::new();
        params.insert_opt("currency", currency);
        self.execute(RequestDescriptor::with_query(FUTURES_ACCOUNT.route()?, params)?)
            .await
    }

    /// Place a futures order; a missing `client_oid` is generated
    ///
    /// POST /api/v1/orders
    pub async fn place_futures_order(&self, mut order: FuturesOrderRequest) -> Result<OrderPlaced> {
        ensure_client_oid(&mut order.client_oid);
        self.execute(RequestDescriptor::with_json(
            FUTURES_PLACE_ORDER.route()?,
            &order,
        )?)
        .await
    }

    /// DELETE /api/v1/orders/{orderId}
    pub async fn cancel_futures_order(&self, order_id: &str) -> Result<CancelledOrders> {
        let route = FUTURES_CANCEL_ORDER.route_with(&[("orderId", order_id)])?;
        self.execute(RequestDescriptor::new(route)).await
    }

    /// GET /api/v1/orders
    pub async fn futures_orders(
        &self,
        query: &FuturesOrdersQuery,
        page: PageRequest,
    ) -> Result<Paginated<FuturesOrder>> {
        let mut params = query.to_params();
        params.insert_page(page);
        self.execute(RequestDescriptor::with_query(FUTURES_ORDERS.route()?, params)?)
            .await
    }

    /// GET /api/v1/orders/{orderId}
    pub async fn futures_order(&self, order_id: &str) -> Result<FuturesOrder> {
        let route = FUTURES_ORDER.route_with(&[("orderId", order_id)])?;
        self.execute(RequestDescriptor::new(route)).await
    }

    /// GET /api/v1/fills
    pub async fn futures_fills(
        &self,
        query: &FuturesFillsQuery,
        page: PageRequest,
    ) -> Result<Paginated<FuturesFill>> {
        let mut params = query.to_params();
        params.insert_page(page);
        self.execute(RequestDescriptor::with_query(FUTURES_FILLS.route()?, params)?)
            .await
    }

    /// GET /api/v1/position?symbol={symbol}
    pub async fn futures_position(&self, symbol: &str) -> Result<FuturesPosition> {
        if symbol.is_empty() {
            return Err(KucoinError::invalid_parameter("symbol", "must not be empty"));
        }
        let params = Params::new().with("symbol", symbol);
        self.execute(RequestDescriptor::with_query(FUTURES_POSITION.route()?, params)?)
            .await
    }

    /// All open positions, optionally for one settlement currency
    ///
    /// GET /api/v1/positions
    pub async fn futures_positions(&self, currency: Option<&str>) -> Result<Vec<FuturesPosition>> {
        let mut params = Params::new();
        params.insert_opt("currency", currency);
        self.execute(RequestDescriptor::with_query(FUTURES_POSITIONS.route()?, params)?)
            .await
    }

    /// GET /api/v1/contracts/active
    pub async fn futures_contracts(&self) -> Result<Vec<ContractInfo>> {
        self.execute(RequestDescriptor::new(FUTURES_CONTRACTS.route()?))
            .await
    }
}
