/// Equality restricted to the attributes that change what a search returns.
///
/// `PartialEq` compares every semantic field. `equals_for_search` ignores
/// presentation-only attributes, so two values that render differently but
/// produce the same backend query compare equal here.
pub trait SearchEq {
    fn equals_for_search(&self, other: &Self) -> bool;
}

impl<T: SearchEq> SearchEq for [T] {
    fn equals_for_search(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.equals_for_search(b))
    }
}

impl<T: SearchEq> SearchEq for Vec<T> {
    fn equals_for_search(&self, other: &Self) -> bool {
        self.as_slice().equals_for_search(other.as_slice())
    }
}

impl<T: SearchEq> SearchEq for Option<T> {
    fn equals_for_search(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.equals_for_search(b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Types without presentation-only attributes are search-equal exactly when
/// they are equal.
macro_rules! search_eq_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::widgets::equality::SearchEq for $ty {
                fn equals_for_search(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

pub(crate) use search_eq_by_value;

search_eq_by_value!(String, bool);
