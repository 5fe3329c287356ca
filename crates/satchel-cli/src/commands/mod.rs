pub mod dig;
pub mod list;
pub mod lookup;
