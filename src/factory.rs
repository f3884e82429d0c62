//! The factory subsystem selects a behavior implementation at runtime based
//! on a model configuration's declared kind.
//!
//! This consists of two parts. The [`registry::FactoryRegistry`] is a table
//! populated at startup which associates a `(category, kind)` pair with a
//! constructor. A category is an opaque name for a feature area (e.g.,
//! `"estimate"`); the kind is the model's [`ModelKind`] tag. The [`build`]
//! facade validates the model, resolves the constructor for the requested
//! category, and invokes it with a normalized parameter set: the model
//! itself plus the [`BuildFlags`].
//!
//! Only chat and embedding models can be built. The remaining kinds exist in
//! the schema but have no registered behaviors, and passing one to [`build`]
//! is a caller error, reported as [`Error::InvalidModelKind`] before the
//! registry is ever consulted. A recognized kind with no constructor under
//! the requested category is a wiring gap instead, reported as
//! [`Error::NotRegistered`].

pub(crate) mod registry;
pub(crate) mod wiring;

use thiserror::Error;

use crate::schema::{Model, ModelKind};
use registry::FactoryRegistry;

/// The closed set of kinds the factory recognizes.
pub(crate) const CONSTRUCTIBLE_KINDS: [ModelKind; 2] = [ModelKind::Chat, ModelKind::Embedding];

#[derive(Error, Debug)]
pub(crate) enum Error {
    /// The model's kind is outside the constructible set.
    #[error("cannot build from a \"{0}\" model, expected one of: chat, embedding")]
    InvalidModelKind(ModelKind),
    /// No constructor was registered for the `(category, kind)` pair.
    #[error("no constructor registered for category \"{category}\" and model kind \"{kind}\"")]
    NotRegistered { category: String, kind: ModelKind },
}

/// Behavioral flags passed through to every constructor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BuildFlags {
    /// Run the constructed behavior synchronously.
    pub sync: bool,
    /// Persist whatever the constructed behavior produces.
    pub to_db: bool,
}

/// Build a `T` for `model` from the constructor registered under
/// `(category, model.kind())`.
///
/// The facade is stateless: it validates, resolves, invokes and hands the
/// product back unchanged. Exactly one construction per call, no caching
/// and no retry. Ownership of both the model and the product passes to the
/// constructor and caller respectively.
pub(crate) fn build<T>(
    registry: &FactoryRegistry<T>,
    model: Model,
    category: &str,
    flags: BuildFlags,
) -> Result<T, Error> {
    let kind = model.kind();

    if !CONSTRUCTIBLE_KINDS.contains(&kind) {
        return Err(Error::InvalidModelKind(kind));
    }

    let constructor = registry.get(category, kind)?;

    Ok(constructor(model, flags))
}
