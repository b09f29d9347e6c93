/*!
 * Core selection: entries, the bounded heap and the selector driving it
 */

pub mod entry;
pub mod heap;
pub mod selector;

pub use entry::{Entry, ModTime, SequenceCounter};
pub use heap::{BoundedTopHeap, DrainAscending, HeapError, OfferOutcome};
pub use selector::{select, Selection, Selector};
