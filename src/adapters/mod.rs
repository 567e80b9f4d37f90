//! Adapters exposing plain business objects as callable targets

pub mod calculator;

pub use calculator::{
    Calculator, CalculatorTarget, IterativeCalculator, RecursiveCalculator, CALCULATOR_NAMESPACE,
    MAX_FACTORIAL_INPUT,
};
