// vim: tw=80
//! Structured logging of dispatch, when the `tracing` feature is enabled.
use cfg_if::cfg_if;

use crate::{
    call::CallSource,
    expectation::{ExpectationInfo, MatchResult},
    report::{CallReport, ExpectationReport, MatchReport},
};

cfg_if! {
    if #[cfg(feature = "tracing")] {
        pub(crate) fn consulted(source: &CallSource<'_>,
            info: &ExpectationInfo, result: &MatchResult)
        {
            tracing::trace!(mock = %source.name, mock_id = %source.id,
                expectation = info.id(), category = %result.category,
                "consulted expectation");
        }

        pub(crate) fn full_match(call: &CallReport, matched: &MatchReport) {
            tracing::debug!(mock = %call.mock, mock_id = %call.mock_id,
                expectation = matched.expectation.id(),
                "{call} handled by {}", matched.expectation);
        }

        pub(crate) fn inapplicable_matches(call: &CallReport,
            partial: &[MatchReport], rejected: &[MatchReport])
        {
            tracing::warn!(mock = %call.mock, mock_id = %call.mock_id,
                candidates = partial.len(), rejected = rejected.len(),
                "{call}: no applicable expectation");
        }

        pub(crate) fn no_matches(call: &CallReport, rejected: &[MatchReport]) {
            tracing::warn!(mock = %call.mock, mock_id = %call.mock_id,
                candidates = rejected.len(),
                "{call}: no matching expectation");
        }

        pub(crate) fn unfulfilled_expectation(report: &ExpectationReport) {
            tracing::error!(expectation = report.expectation.id(),
                "{report}");
        }
    } else {
        pub(crate) fn consulted(_source: &CallSource<'_>,
            _info: &ExpectationInfo, _result: &MatchResult)
        {}

        pub(crate) fn full_match(_call: &CallReport, _matched: &MatchReport) {}

        pub(crate) fn inapplicable_matches(_call: &CallReport,
            _partial: &[MatchReport], _rejected: &[MatchReport])
        {}

        pub(crate) fn no_matches(_call: &CallReport,
            _rejected: &[MatchReport])
        {}

        pub(crate) fn unfulfilled_expectation(_report: &ExpectationReport) {}
    }
}
