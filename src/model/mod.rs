//! Data model: analysis responses coming in, EOB records going out.

mod record;
mod response;

pub use record::{Field, Record};
pub use response::{AnalysisResponse, Block, BlockType, Relationship, RelationshipType};
