pub mod indexed;

pub use indexed::IndexedMaxHeap;
