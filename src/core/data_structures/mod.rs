/*!
 * Data Structures
 *
 * Containers backing the run-queue policies:
 * - Skew heap for key-ordered policies (stride, fair)
 * - Run list for arrival-ordered policies (FCFS, round-robin, MLFQ levels)
 *
 * # Performance
 *
 * - Skew heap: amortized O(log n) insert and arbitrary removal, O(1) peek
 * - Run list: O(1) append, removal by PID and membership test
 */

mod run_list;
mod skew_heap;

pub use run_list::{Iter as RunListIter, RunList};
pub use skew_heap::{Comparator, HeapHandle, SkewHeap};
