//! Values that record where a safe default was substituted.

use thiserror::Error;

/// Reason a priced value fell back to a default.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Degradation {
    #[error("rank catalog unavailable, using built-in catalog: {reason}")]
    CatalogUnavailable { reason: String },
    #[error("override table unavailable, pricing by formula: {reason}")]
    OverrideReadFailure { reason: String },
    #[error("rank `{rank_id}` not in catalog, using supplied record")]
    MalformedRankReference { rank_id: String },
}

/// A value plus whether any default was substituted while producing it.
#[derive(Clone, Debug, PartialEq)]
pub enum Priced<T> {
    Ok(T),
    Degraded(T, Vec<Degradation>),
}

impl<T> Priced<T> {
    pub fn new(value: T, degradations: Vec<Degradation>) -> Self {
        if degradations.is_empty() {
            Self::Ok(value)
        } else {
            Self::Degraded(value, degradations)
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Ok(value) | Self::Degraded(value, _) => value,
        }
    }

    pub fn into_parts(self) -> (T, Vec<Degradation>) {
        match self {
            Self::Ok(value) => (value, Vec::new()),
            Self::Degraded(value, reasons) => (value, reasons),
        }
    }

    pub fn degradations(&self) -> &[Degradation] {
        match self {
            Self::Ok(_) => &[],
            Self::Degraded(_, reasons) => reasons,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(..))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Priced<U> {
        match self {
            Self::Ok(value) => Priced::Ok(f(value)),
            Self::Degraded(value, reasons) => Priced::Degraded(f(value), reasons),
        }
    }

    /// Appends `extra` reasons, switching to `Degraded` if any are given.
    pub fn with_degradations(self, extra: impl IntoIterator<Item = Degradation>) -> Self {
        let (value, mut reasons) = self.into_parts();
        reasons.extend(extra);
        Self::new(value, reasons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_without_reasons_is_ok() {
        let priced = Priced::new(5.0, Vec::new());
        assert!(!priced.is_degraded());
        assert_eq!(*priced.value(), 5.0);
    }

    #[test]
    fn with_degradations_promotes_to_degraded() {
        let priced = Priced::Ok(1).with_degradations([Degradation::MalformedRankReference {
            rank_id: "ghost".into(),
        }]);
        assert!(priced.is_degraded());
        assert_eq!(priced.degradations().len(), 1);
        assert_eq!(priced.map(|v| v * 2).into_parts().0, 2);
    }

    #[test]
    fn display_names_the_cause() {
        let reason = Degradation::CatalogUnavailable {
            reason: "timeout".into(),
        };
        assert!(reason.to_string().contains("timeout"));
    }
}
