use std::fmt;
use std::fmt::{Display, Formatter};

use crate::parser::util::underscore;

/// A parsed dotted class name, e.g. `App.Models.Recipe`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePath {
    segments: Vec<String>,
}

impl NamePath {
    pub(crate) fn new(segments: Vec<String>) -> Self {
        NamePath { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Segments leading to the container, i.e. everything but the last one.
    pub fn namespace(&self) -> &[String] {
        match self.segments.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    pub fn short_name(&self) -> &str {
        self.segments.last().map(|s| s.as_str()).unwrap_or("")
    }

    pub fn full_name(&self) -> String {
        self.segments.join(".")
    }

    /// `App.Models.RecipeBox` becomes `app_models_recipe_box`.
    pub fn underscored_full_name(&self) -> String {
        underscore(&self.segments.join("_"))
    }

    pub fn underscored_short_name(&self) -> String {
        underscore(self.short_name())
    }
}

impl Display for NamePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}
