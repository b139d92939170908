use std::collections::HashSet;

/* Well known member names */
pub const SETUP: &str = "setup";
pub const INIT: &str = "init";
pub const NEW_INSTANCE: &str = "newInstance";
pub const DEFAULTS: &str = "defaults";
pub const CONSTRUCTOR: &str = "constructor";
pub const CONSTRUCTOR_EXTENDS: &str = "constructorExtends";
pub const PROTOTYPE: &str = "prototype";
pub const FULL_NAME: &str = "fullName";
pub const SHORT_NAME: &str = "shortName";
pub const UNDERSCORED_FULL_NAME: &str = "_fullName";
pub const UNDERSCORED_SHORT_NAME: &str = "_shortName";
pub const NAMESPACE: &str = "namespace";

lazy_static! {
    /// Statics every class answers from its own descriptor rather than its static table.
    pub static ref RESERVED_STATICS: HashSet<&'static str> = [
        CONSTRUCTOR,
        PROTOTYPE,
        FULL_NAME,
        SHORT_NAME,
        UNDERSCORED_FULL_NAME,
        UNDERSCORED_SHORT_NAME,
        NAMESPACE,
    ]
    .iter()
    .cloned()
    .collect();
}
