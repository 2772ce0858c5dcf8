mod table;

pub use table::{TypeDescription, TypeTable};
