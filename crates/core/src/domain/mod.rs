pub mod offer;
pub mod product;
