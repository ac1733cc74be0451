use std::fmt;

use serde::Serialize;

use crate::base::{DbId, Distance};
use crate::error::{KnnError, Result};

/// A candidate neighbor: distance to the query + object identifier
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct DistancePair {
    distance: Distance,
    id: DbId,
}

impl DistancePair {
    /// Creates a pair, rejecting NaN, infinite or negative distances
    pub fn new(distance: Distance, id: DbId) -> Result<Self> {
        check_distance(distance)?;
        // -0 and +0 must compare equal under total ordering
        Ok(Self {
            distance: distance + 0.,
            id,
        })
    }

    #[inline]
    pub fn distance(&self) -> Distance {
        self.distance
    }

    #[inline]
    pub fn id(&self) -> DbId {
        self.id
    }
}

impl fmt::Display for DistancePair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.distance, self.id)
    }
}

#[inline]
pub(crate) fn check_distance(distance: Distance) -> Result<()> {
    if distance.is_finite() && distance >= 0. {
        Ok(())
    } else {
        Err(KnnError::InvalidDistance(distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_distances() {
        for d in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1e-9] {
            assert!(matches!(
                DistancePair::new(d, 0),
                Err(KnnError::InvalidDistance(_))
            ));
        }
    }

    #[test]
    fn test_accessors() {
        let pair = DistancePair::new(0., 7).unwrap();
        assert_eq!(pair.distance(), 0.);
        assert_eq!(pair.id(), 7);
        assert_eq!(pair.to_string(), "0:7");
    }
}
