//! # jclass - classical inheritance over a dynamic object model
//!
//! A small class system layered on top of prototype-linked dynamic objects:
//! - `extend` builds a new class from a base class plus static and prototype members
//! - overriding methods can call the implementation they replaced (`call_super`)
//! - named classes are published into a namespace registry under a dotted path
//! - instances are built in two stages, `setup` then `init`
//! - `proxy` builds bound, curried callback pipelines
//!
//! ## Quick Start
//!
//! ```
//! use jclass::runner::class::ExtendArgs;
//! use jclass::runner::ds::object::ObjectRef;
//! use jclass::runner::ds::realm::Realm;
//! use jclass::runner::ds::value::Value;
//!
//! let realm = Realm::new();
//!
//! let animal = realm
//!     .extend(
//!         ExtendArgs::new().named("Zoo.Animal").proto(
//!             ObjectRef::new()
//!                 .with_method("init", |inv, args| {
//!                     inv.this().set("name", args.into_iter().next().unwrap_or_default())?;
//!                     Ok(Value::Undefined)
//!                 })
//!                 .with_method("speak", |_, _| Ok(Value::from("..."))),
//!         ),
//!     )
//!     .unwrap();
//!
//! let dog = animal
//!     .extend(ExtendArgs::new().proto(ObjectRef::new().with_method("speak", |inv, args| {
//!         let parent = inv.call_super(args)?;
//!         Ok(Value::from(format!("Woof {}", parent)))
//!     })))
//!     .unwrap();
//!
//! let rex = dog.construct(vec![Value::from("Rex")]).unwrap();
//! assert_eq!(rex.call_method("speak", vec![]).unwrap(), Value::from("Woof ..."));
//! assert!(rex.instance_of(&animal));
//! assert_eq!(realm.lookup("Zoo.Animal").unwrap(), Some(Value::Class(animal.clone())));
//! ```
//!
//! ## Inheritance Model
//!
//! Statics and prototype members are inherited differently:
//!
//! 1. **Statics are snapshots**: when a class is extended, every static of the base
//!    is copied onto the new class. Changing the base afterwards does not affect it.
//!
//! 2. **Prototypes are live**: the new prototype is a raw instance of the base, so
//!    anything later added to an ancestor prototype is visible to every descendant.
//!
//! 3. **Super is explicit**: an overriding method carries a link to the method it
//!    replaced. `Invocation::call_super` follows that link with the same `this`.
//!
//! ## Architecture
//!
//! - **[`parser`]** - dotted class name grammar
//! - **[`runner`]** - the class system
//!   - **[`runner::ds`]** - values, objects, lists, methods, realm
//!   - **[`runner::class`]** - extend, instantiation, proxy
//!   - **[`runner::namespace`]** - the namespace registry
//!   - **[`runner::config`]** - realm configuration

#[macro_use]
extern crate lazy_static;

pub mod parser;
pub mod runner;
