//! AWS Textract `AnalyzeDocument` backend.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_textract::error::DisplayErrorContext;
use aws_sdk_textract::operation::analyze_document::builders::AnalyzeDocumentFluentBuilder;
use aws_sdk_textract::primitives::Blob;
use aws_sdk_textract::types::{self, FeatureType};
use aws_sdk_textract::Client as TextractClient;
use tokio::runtime::Runtime;

use super::{AnalysisFeature, DocumentAnalyzer};
use crate::error::{Error, Result};
use crate::model::{AnalysisResponse, Block, BlockType, Relationship, RelationshipType};

/// Synchronous Textract client.
///
/// Credentials and region come from the ambient AWS environment. Each call
/// blocks until the service answers; there is no retry layer on top of the
/// SDK's own.
pub struct TextractAnalyzer {
    client: TextractClient,
    runtime: Runtime,
    features: Vec<AnalysisFeature>,
}

impl TextractAnalyzer {
    /// Create an analyzer from the default AWS configuration chain.
    pub fn new() -> Result<Self> {
        Self::build(None)
    }

    /// Create an analyzer for an explicit region.
    pub fn with_region(region: impl Into<String>) -> Result<Self> {
        Self::build(Some(region.into()))
    }

    /// Wrap an existing client (for custom endpoints or credentials).
    pub fn with_client(client: TextractClient) -> Result<Self> {
        Ok(Self {
            client,
            runtime: build_runtime()?,
            features: AnalysisFeature::DEFAULT.to_vec(),
        })
    }

    /// Replace the requested feature set.
    pub fn with_features(mut self, features: impl IntoIterator<Item = AnalysisFeature>) -> Self {
        self.features = features.into_iter().collect();
        self
    }

    fn build(region: Option<String>) -> Result<Self> {
        let runtime = build_runtime()?;
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let config = runtime.block_on(loader.load());

        Ok(Self {
            client: TextractClient::new(&config),
            runtime,
            features: AnalysisFeature::DEFAULT.to_vec(),
        })
    }

    fn request(&self, bytes: &[u8]) -> AnalyzeDocumentFluentBuilder {
        let document = types::Document::builder()
            .bytes(Blob::new(bytes.to_vec()))
            .build();

        self.features.iter().fold(
            self.client.analyze_document().document(document),
            |request, feature| request.feature_types(FeatureType::from(feature.as_str())),
        )
    }
}

fn build_runtime() -> Result<Runtime> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;
    Ok(runtime)
}

impl DocumentAnalyzer for TextractAnalyzer {
    fn name(&self) -> &str {
        "textract"
    }

    fn analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisResponse> {
        let request = self.request(bytes);
        let output = self.runtime.block_on(request.send()).map_err(|e| {
            log::error!("Textract AnalyzeDocument failed: {}", DisplayErrorContext(&e));
            Error::Analysis(DisplayErrorContext(&e).to_string())
        })?;

        let blocks: Vec<Block> = output.blocks().iter().map(convert_block).collect();
        log::debug!("Textract returned {} blocks", blocks.len());
        Ok(AnalysisResponse::new(blocks))
    }
}

fn convert_block(block: &types::Block) -> Block {
    Block {
        block_type: block
            .block_type()
            .map(|t| BlockType::from_wire(t.as_str()))
            .unwrap_or(BlockType::Other),
        id: block.id().unwrap_or_default().to_string(),
        text: block.text().map(str::to_string),
        relationships: block
            .relationships()
            .iter()
            .map(|r| Relationship {
                kind: r
                    .r#type()
                    .map(|t| RelationshipType::from_wire(t.as_str()))
                    .unwrap_or(RelationshipType::Other),
                ids: r.ids().to_vec(),
            })
            .collect(),
        row_index: block.row_index().and_then(|i| u32::try_from(i).ok()),
        column_index: block.column_index().and_then(|i| u32::try_from(i).ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_analyzer() -> TextractAnalyzer {
        let config = aws_sdk_textract::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();
        TextractAnalyzer::with_client(TextractClient::from_conf(config)).unwrap()
    }

    #[test]
    fn test_request_asks_for_forms_and_tables() {
        let analyzer = offline_analyzer();
        let request = analyzer.request(b"%PDF-1.7");

        assert_eq!(
            request.get_feature_types().as_deref(),
            Some(&[FeatureType::Forms, FeatureType::Tables][..])
        );
        let bytes = request
            .get_document()
            .as_ref()
            .and_then(|d| d.bytes())
            .map(|b| b.clone().into_inner());
        assert_eq!(bytes.as_deref(), Some(&b"%PDF-1.7"[..]));
        assert_eq!(analyzer.name(), "textract");
    }

    #[test]
    fn test_with_features_replaces_request_features() {
        let analyzer = offline_analyzer().with_features([AnalysisFeature::Tables]);
        let request = analyzer.request(b"%PDF-1.7");
        assert_eq!(
            request.get_feature_types().as_deref(),
            Some(&[FeatureType::Tables][..])
        );
    }

    #[test]
    fn test_convert_cell_block() {
        let sdk_block = types::Block::builder()
            .block_type(types::BlockType::Cell)
            .id("cell-1")
            .row_index(5)
            .column_index(2)
            .relationships(
                types::Relationship::builder()
                    .r#type(types::RelationshipType::Child)
                    .ids("w1")
                    .ids("w2")
                    .build(),
            )
            .build();

        let block = convert_block(&sdk_block);
        assert_eq!(block.block_type, BlockType::Cell);
        assert_eq!(block.id, "cell-1");
        assert_eq!(block.row_index, Some(5));
        assert_eq!(block.column_index, Some(2));
        assert_eq!(block.child_ids().collect::<Vec<_>>(), ["w1", "w2"]);
    }

    #[test]
    fn test_convert_line_block() {
        let sdk_block = types::Block::builder()
            .block_type(types::BlockType::Line)
            .id("l1")
            .text("Payment to: Acme")
            .build();

        let block = convert_block(&sdk_block);
        assert_eq!(block.block_type, BlockType::Line);
        assert_eq!(block.text.as_deref(), Some("Payment to: Acme"));
        assert!(block.relationships.is_empty());
    }
}
