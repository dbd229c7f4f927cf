pub(crate) mod allocate;
pub(crate) mod assemble;
pub(crate) mod config;
pub(crate) mod lower_thirds;
pub(crate) mod probe;
pub(crate) mod transitions;
