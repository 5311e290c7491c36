/// Hard layout failures. Recoverable conditions (infeasible candidates,
/// bounds-exceeded placements, scoring ties) are filtered or logged instead.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// No wrap-line budget admits a placement inside the size caps. Never
    /// degraded into a partial result.
    #[error("could not lay out `{line}` within {max_width} x {max_height}")]
    Unsatisfiable {
        line: String,
        max_width: f32,
        max_height: f32,
    },

    /// The measurement callback broke its contract of returning at least
    /// one wrapping per label.
    #[error("label measurement returned no wrappings for station `{station}`")]
    NoWrappings { station: String },
}
