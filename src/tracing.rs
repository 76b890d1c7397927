//! Tracing support for family members.
//!
//! This module provides the `instrument` method for running a member's
//! primitive inside a tracing span. Feature-gated behind
//! `#[cfg(feature = "tracing")]`.

use crate::{
    BiConsumable, BiFunctional, Consumable, Functional, Processable, Supplyable, TreConsumable,
    TreFunctional,
};

/// Extension trait for adding tracing instrumentation to family members.
///
/// This trait is only available when the `tracing` feature is enabled.
pub trait Instrument: Sized {
    /// A member of the same shape whose primitive runs inside `span`.
    ///
    /// The span is entered for every invocation and exited when the
    /// primitive returns, whether it succeeded or failed.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use crayfish_functional::tracing::Instrument;
    /// use crayfish_functional::Functional;
    /// use tracing::debug_span;
    ///
    /// let parse = Functional::new(|s: &str| s.parse::<u16>().map_err(|e| e.to_string()))
    ///     .instrument(debug_span!("parse_port"));
    /// ```
    fn instrument(&self, span: tracing::Span) -> Self;
}

impl<T, E> Instrument for Supplyable<T, E>
where
    T: 'static,
    E: 'static,
{
    fn instrument(&self, span: tracing::Span) -> Self {
        let this = self.clone();
        Supplyable::new(move || span.in_scope(|| this.execute()))
    }
}

impl<E> Instrument for Processable<E>
where
    E: 'static,
{
    fn instrument(&self, span: tracing::Span) -> Self {
        let this = self.clone();
        Processable::new(move || span.in_scope(|| this.execute()))
    }
}

impl<T, E> Instrument for Consumable<T, E>
where
    T: 'static,
    E: 'static,
{
    fn instrument(&self, span: tracing::Span) -> Self {
        let this = self.clone();
        Consumable::new(move |parameter| span.in_scope(|| this.execute(parameter)))
    }
}

impl<T, R, E> Instrument for Functional<T, R, E>
where
    T: 'static,
    R: 'static,
    E: 'static,
{
    fn instrument(&self, span: tracing::Span) -> Self {
        let this = self.clone();
        Functional::new(move |parameter| span.in_scope(|| this.execute(parameter)))
    }
}

impl<T, U, E> Instrument for BiConsumable<T, U, E>
where
    T: 'static,
    U: 'static,
    E: 'static,
{
    fn instrument(&self, span: tracing::Span) -> Self {
        let this = self.clone();
        BiConsumable::new(move |left, right| span.in_scope(|| this.execute(left, right)))
    }
}

impl<T, U, R, E> Instrument for BiFunctional<T, U, R, E>
where
    T: 'static,
    U: 'static,
    R: 'static,
    E: 'static,
{
    fn instrument(&self, span: tracing::Span) -> Self {
        let this = self.clone();
        BiFunctional::new(move |left, right| span.in_scope(|| this.execute(left, right)))
    }
}

impl<T, U, V, E> Instrument for TreConsumable<T, U, V, E>
where
    T: 'static,
    U: 'static,
    V: 'static,
    E: 'static,
{
    fn instrument(&self, span: tracing::Span) -> Self {
        let this = self.clone();
        TreConsumable::new(move |left, middle, right| {
            span.in_scope(|| this.execute(left, middle, right))
        })
    }
}

impl<T, U, V, R, E> Instrument for TreFunctional<T, U, V, R, E>
where
    T: 'static,
    U: 'static,
    V: 'static,
    R: 'static,
    E: 'static,
{
    fn instrument(&self, span: tracing::Span) -> Self {
        let this = self.clone();
        TreFunctional::new(move |left, middle, right| {
            span.in_scope(|| this.execute(left, middle, right))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResultSlot;
    use tracing_test::traced_test;

    #[test]
    fn instrument_returns_value() {
        let supplier = Supplyable::<_, String>::new(|| Ok(42))
            .instrument(tracing::info_span!("test_span"));
        assert_eq!(supplier.execute(), Ok(42));
    }

    #[test]
    fn error_in_span_propagates() {
        let f = Functional::<i32, i32, _>::new(|_| Err("oops".to_string()))
            .instrument(tracing::info_span!("failing"));
        assert_eq!(f.execute(1), Err("oops".to_string()));
    }

    #[test]
    fn composition_with_instrument() {
        let f = BiFunctional::<i32, i32, i32, String>::new(|a, b| Ok(a + b))
            .instrument(tracing::debug_span!("add"))
            .left(5)
            .further_apply(Functional::new(|x: i32| Ok(x * 2)))
            .instrument(tracing::debug_span!("double"));
        assert_eq!(f.execute(5), Ok(20));
    }

    #[test]
    fn instrumented_primitive_runs_under_subscriber() {
        let subscriber = tracing_subscriber::fmt().with_test_writer().finish();
        tracing::subscriber::with_default(subscriber, || {
            let effect = TreConsumable::<i32, i32, i32, String>::new(|a, b, c| {
                tracing::info!(sum = a + b + c, "summing");
                Ok(())
            })
            .instrument(tracing::info_span!("sum3"));
            assert_eq!(effect.execute(1, 2, 3), Ok(()));
        });
    }

    #[traced_test]
    #[test]
    fn adapter_traces_skipped_primitive() {
        let slot = ResultSlot::<i32, String>::settled(Ok(1));
        Supplyable::new(|| Ok(2)).completable(slot.clone()).run();
        assert!(logs_contain("primitive skipped"));
    }

    #[traced_test]
    #[test]
    fn adapter_traces_failure() {
        let slot = ResultSlot::<(), String>::new();
        Processable::new(|| Err("bad".to_string()))
            .completable(slot.clone())
            .run();
        assert!(logs_contain("settling result slot with its error"));
    }
}
