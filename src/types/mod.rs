pub mod abs;
pub mod enums;
