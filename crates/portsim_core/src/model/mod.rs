mod pool;
mod projection;

pub use pool::{AssetStatistics, ReturnPool, ReturnPoolData};
pub use projection::ProjectionMatrix;
