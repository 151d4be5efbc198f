/*
[INPUT]:  KuCoin spot and futures wire schemas
[OUTPUT]: Request bodies, list filters, payload models and wire enums
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

pub mod enums;
pub mod models;
pub mod requests;
pub mod responses;

pub use enums::*;
pub use models::*;
pub use requests::*;
pub use responses::*;
