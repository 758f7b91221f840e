pub mod serialization;

pub use serialization::TurtleSerializer;
