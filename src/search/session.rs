//! The search session result sets refer back to.

use std::fmt;
use std::rc::Rc;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::response::{Doc, ResponseNormalizer, SolrResponse};
use crate::results::{DefaultHitFactory, HitFactory, ResultSet, ResultSetOptions, SearchHit};
use crate::search::extension::MethodRegistry;

/// Configuration, hit construction and extension methods shared by every
/// result set of one search client.
///
/// Register extension methods and a custom hit factory before wrapping the
/// session in an [`Rc`]; result sets only hold shared references.
pub struct SearchSession {
    config: SearchConfig,
    normalizer: ResponseNormalizer,
    methods: MethodRegistry,
    hit_factory: Box<dyn HitFactory>,
}

impl SearchSession {
    /// Create a session from a validated config.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(SearchSession {
            normalizer: ResponseNormalizer::new(config.document),
            config,
            methods: MethodRegistry::new(),
            hit_factory: Box::new(DefaultHitFactory),
        })
    }

    /// Replace the hit factory.
    pub fn with_hit_factory<F: HitFactory + 'static>(mut self, factory: F) -> Self {
        self.hit_factory = Box::new(factory);
        self
    }

    /// The session config.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Normalizer configured with the session's document options.
    pub fn normalizer(&self) -> &ResponseNormalizer {
        &self.normalizer
    }

    /// Registered extension methods.
    pub fn methods(&self) -> &MethodRegistry {
        &self.methods
    }

    /// Register extension methods.
    pub fn methods_mut(&mut self) -> &mut MethodRegistry {
        &mut self.methods
    }

    /// Build the hit for one document.
    pub fn instantiate(&self, doc: &Doc) -> SearchHit {
        self.hit_factory.instantiate(doc, self)
    }

    /// Wrap a raw body with the configured document options.
    pub fn response<S: Into<String>>(&self, raw: S) -> SolrResponse {
        SolrResponse::with_options(raw, self.config.document)
    }

    /// Wrap a raw body in a result set.
    pub fn results<S: Into<String>>(self: &Rc<Self>, raw: S) -> Result<ResultSet> {
        let options = ResultSetOptions {
            is_group_result: false,
            geo_unit: self.config.geo_unit,
        };
        ResultSet::new(self.response(raw), Rc::clone(self), options)
    }
}

impl fmt::Debug for SearchSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchSession")
            .field("config", &self.config)
            .field("methods", &self.methods)
            .finish()
    }
}
