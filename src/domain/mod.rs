pub mod article;
pub mod images;
pub mod link;
pub mod messages;
pub mod result;

pub use article::ArticleRecord;
pub use images::ImageSet;
pub use link::{dedup_by_url, LinkKind, LinkLocation, LinkRecord, Position};
pub use messages::{OrchestratorRequest, OrchestratorResponse, PageMessage, RelayMessage};
pub use result::{ErrorReply, ExtractionResult};
