pub mod dead_condition;
