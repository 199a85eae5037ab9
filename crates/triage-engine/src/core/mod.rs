pub use self::{collection::*, disease::*, patient::*, plan::*, solver::*};

pub(crate) mod collection;
pub(crate) mod disease;
pub(crate) mod patient;
pub(crate) mod plan;
pub(crate) mod solver;
