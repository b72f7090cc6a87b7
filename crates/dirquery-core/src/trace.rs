//! Query tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect execution semantics.

use crate::{
    directory::SearchScope,
    error::{ErrorClass, ErrorOrigin},
    hydrate::HydratorKind,
};
use std::sync::Arc;

///
/// QueryTraceSink
///

pub trait QueryTraceSink: Send + Sync {
    fn on_event(&self, event: QueryTraceEvent);
}

///
/// QueryTraceEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryTraceEvent {
    Start {
        kind: HydratorKind,
        scope: SearchScope,
        attributes: u32,
    },
    Searched {
        kind: HydratorKind,
        entries: u64,
    },
    Finish {
        kind: HydratorKind,
        rows: u64,
    },
    Error {
        kind: HydratorKind,
        class: ErrorClass,
        origin: ErrorOrigin,
    },
}

///
/// TraceScope
/// Emits `Start` on creation; closed by exactly one of `finish` or `error`.
///

pub(crate) struct TraceScope {
    sink: Arc<dyn QueryTraceSink>,
    kind: HydratorKind,
}

impl TraceScope {
    fn new(
        sink: Arc<dyn QueryTraceSink>,
        kind: HydratorKind,
        scope: SearchScope,
        attributes: usize,
    ) -> Self {
        sink.on_event(QueryTraceEvent::Start {
            kind,
            scope,
            attributes: u32::try_from(attributes).unwrap_or(u32::MAX),
        });

        Self { sink, kind }
    }

    pub(crate) fn searched(&self, entries: u64) {
        self.sink.on_event(QueryTraceEvent::Searched {
            kind: self.kind,
            entries,
        });
    }

    pub(crate) fn finish(self, rows: u64) {
        self.sink.on_event(QueryTraceEvent::Finish {
            kind: self.kind,
            rows,
        });
    }

    pub(crate) fn error(self, class: ErrorClass, origin: ErrorOrigin) {
        self.sink.on_event(QueryTraceEvent::Error {
            kind: self.kind,
            class,
            origin,
        });
    }
}

pub(crate) fn start_query_trace(
    sink: Option<&Arc<dyn QueryTraceSink>>,
    kind: HydratorKind,
    scope: SearchScope,
    attributes: usize,
) -> Option<TraceScope> {
    let sink = Arc::clone(sink?);
    Some(TraceScope::new(sink, kind, scope, attributes))
}
