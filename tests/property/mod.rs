//! Property-based tests for pagination aggregation

mod aggregation;
