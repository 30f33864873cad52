use crate::index::{IndexLoader, SerdeYamlParser, YamlParser};
use crate::logging::{AuditSink, FactsEmitter};
use crate::policy::Policy;

/// Builder for constructing a `VDataset` with ergonomic chaining.
pub struct ApiBuilder<E: FactsEmitter, A: AuditSink> {
    facts: E,
    audit: A,
    policy: Policy,
    yaml: Option<Box<dyn YamlParser>>,
}

impl<E: FactsEmitter, A: AuditSink> ApiBuilder<E, A> {
    pub fn new(facts: E, audit: A) -> Self {
        Self {
            facts,
            audit,
            policy: Policy::default(),
            yaml: Some(Box::new(SerdeYamlParser)),
        }
    }

    #[must_use]
    pub fn policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn yaml_parser(mut self, parser: Box<dyn YamlParser>) -> Self {
        self.yaml = Some(parser);
        self
    }

    /// YAML index files load as empty mappings with a warning.
    #[must_use]
    pub fn without_yaml(mut self) -> Self {
        self.yaml = None;
        self
    }

    pub fn build(self) -> super::VDataset<E, A> {
        super::VDataset::new(self.facts, self.audit, self.policy)
            .with_loader(IndexLoader::new(self.yaml))
    }
}
