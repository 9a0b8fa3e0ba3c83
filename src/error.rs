use thiserror::Error;

/// Query combination errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombineError {
    #[error("no queries have been added to the combiner")]
    NoQueries,

    #[error("query {index} has no WHERE clause to merge")]
    MissingWhereClause { index: usize },

    #[error("query {index} has no WINDOW block inside its WHERE clause")]
    MissingWindowBlock { index: usize },

    #[error("cannot pair {targets} aggregated variables with {aliases} projection aliases")]
    AggregationProjectionMismatch { targets: usize, aliases: usize },
}
