use std::sync::Arc;

use ragdoc_core::{ContentFormatter, Document};

/// Pipeline stage that attaches a content formatter to a batch of documents.
///
/// When both the document's current formatter and the transformer's formatter are
/// [`ragdoc_core::DefaultContentFormatter`]s, their excluded metadata keys are merged
/// instead of one replacing the other. Templates come from the document unless
/// `rewrite_templates` is set. Any other combination replaces the formatter outright.
#[derive(Clone, Debug)]
pub struct ContentFormatTransformer {
    formatter: Arc<dyn ContentFormatter>,
    rewrite_templates: bool,
}

impl ContentFormatTransformer {
    pub fn new(formatter: Arc<dyn ContentFormatter>) -> Self {
        Self {
            formatter,
            rewrite_templates: false,
        }
    }

    pub fn rewrite_templates(mut self, value: bool) -> Self {
        self.rewrite_templates = value;
        self
    }

    pub fn transform(&self, mut docs: Vec<Document>) -> Vec<Document> {
        for doc in &mut docs {
            self.apply(doc);
        }
        docs
    }

    fn apply(&self, doc: &mut Document) {
        let merged = match (
            doc.content_formatter().as_default(),
            self.formatter.as_default(),
        ) {
            (Some(current), Some(incoming)) if self.rewrite_templates => {
                Some(incoming.merge_exclusions(current))
            }
            (Some(current), Some(incoming)) => Some(current.merge_exclusions(incoming)),
            _ => None,
        };

        match merged {
            Some(formatter) => doc.set_content_formatter(Arc::new(formatter)),
            None => doc.set_content_formatter(self.formatter.clone()),
        }
    }
}
