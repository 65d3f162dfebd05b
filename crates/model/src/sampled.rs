//! Sampled evaluation rows joined with their exposure estimates.

use std::collections::{BTreeSet, HashMap};

use sintra_primitives::{EvaluationKey, ExposureRecord, Field, Lookback, Observation};
use sintra_traits::CrossSectionEntity;

/// One sampled observation with the exposures of its (security, year) key.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledRow {
    /// The sampled observation.
    pub observation: Observation,
    /// Exposure records keyed by lookback.
    pub exposures: HashMap<Lookback, ExposureRecord>,
}

impl SampledRow {
    /// Evaluation key of the row.
    #[must_use]
    pub fn key(&self) -> EvaluationKey {
        EvaluationKey::new(self.observation.security, self.observation.year())
    }

    /// Exposure record for a lookback, if one was estimated.
    #[must_use]
    pub fn exposure(&self, lookback: Lookback) -> Option<&ExposureRecord> {
        self.exposures.get(&lookback)
    }
}

impl CrossSectionEntity for SampledRow {
    fn period(&self) -> i32 {
        self.observation.year()
    }

    fn field(&self, field: Field) -> Option<f64> {
        let value = match field {
            Field::Return => self.observation.ret,
            Field::ExcessReturn => self.observation.excess_return,
            Field::MarketCap => Some(self.observation.market_cap()),
            Field::Beta(l) => self.exposure(l)?.beta(),
            Field::Alpha(l) => self.exposure(l)?.alpha(),
            Field::TotalVolatility(l) => self.exposure(l)?.volatility().map(|v| v.total),
            Field::SystematicVolatility(l) => self.exposure(l)?.volatility().map(|v| v.systematic),
            Field::IdiosyncraticVolatility(l) => {
                self.exposure(l)?.volatility().map(|v| v.idiosyncratic)
            }
        };
        value.filter(|v| v.is_finite())
    }
}

/// Distinct evaluation keys of a sample, in first-seen order.
#[must_use]
pub fn evaluation_keys(sample: &[Observation]) -> Vec<EvaluationKey> {
    let mut seen = BTreeSet::new();
    sample
        .iter()
        .map(|o| EvaluationKey::new(o.security, o.year()))
        .filter(|k| seen.insert(*k))
        .collect()
}

/// Join sampled observations with exposure records on (security, year).
///
/// Rows whose key has no record for a lookback simply lack that lookback.
#[must_use]
pub fn attach_exposures(sample: Vec<Observation>, records: &[ExposureRecord]) -> Vec<SampledRow> {
    let mut by_key: HashMap<EvaluationKey, HashMap<Lookback, ExposureRecord>> = HashMap::new();
    for record in records {
        by_key.entry(record.key()).or_default().insert(record.lookback(), record.clone());
    }

    sample
        .into_iter()
        .map(|observation| {
            let key = EvaluationKey::new(observation.security, observation.year());
            let exposures = by_key.get(&key).cloned().unwrap_or_default();
            SampledRow { observation, exposures }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use sintra_primitives::{
        Date, Exposure, Industry, SecurityId, VolatilityTriple, WindowEstimate,
    };

    use super::*;

    fn obs(security: i64, year: i32) -> Observation {
        Observation {
            security: SecurityId::new(security),
            date: Date::from_ymd_opt(year, 6, 30).unwrap(),
            ret: Some(0.03),
            excess_return: Some(0.025),
            market_excess: Some(0.01),
            price: -8.0,
            shares_outstanding: 50.0,
            industry: Industry::Construction,
        }
    }

    fn record(security: i64, year: i32, lookback: Lookback, beta: Option<f64>) -> ExposureRecord {
        let key = EvaluationKey::new(SecurityId::new(security), year);
        match beta {
            Some(beta) => ExposureRecord::defined(
                key,
                lookback,
                12,
                WindowEstimate {
                    exposure: Exposure { beta, alpha: 0.001 },
                    volatility: VolatilityTriple { total: 0.2, systematic: 0.12, idiosyncratic: 0.15 },
                },
            ),
            None => ExposureRecord::undefined(key, lookback, 2),
        }
    }

    #[test]
    fn keys_are_distinct_in_first_seen_order() {
        let sample = vec![obs(2, 2010), obs(1, 2010), obs(2, 2010), obs(2, 2011)];
        let keys = evaluation_keys(&sample);
        assert_eq!(
            keys,
            vec![
                EvaluationKey::new(SecurityId::new(2), 2010),
                EvaluationKey::new(SecurityId::new(1), 2010),
                EvaluationKey::new(SecurityId::new(2), 2011),
            ]
        );
    }

    #[test]
    fn fields_read_observation_and_exposures() {
        let records = vec![
            record(1, 2010, Lookback::TWELVE, Some(1.5)),
            record(1, 2010, Lookback::THIRTY_SIX, None),
        ];
        let rows = attach_exposures(vec![obs(1, 2010), obs(3, 2010)], &records);

        let row = &rows[0];
        assert_eq!(row.period(), 2010);
        assert_eq!(row.field(Field::ExcessReturn), Some(0.025));
        assert_eq!(row.field(Field::MarketCap), Some(400.0));
        assert_eq!(row.field(Field::Beta(Lookback::TWELVE)), Some(1.5));
        assert_eq!(row.field(Field::SystematicVolatility(Lookback::TWELVE)), Some(0.12));
        assert_eq!(row.field(Field::Beta(Lookback::THIRTY_SIX)), None);
        assert_eq!(row.field(Field::Beta(Lookback::TWENTY_FOUR)), None);

        assert!(rows[1].exposures.is_empty());
        assert_eq!(rows[1].field(Field::Alpha(Lookback::TWELVE)), None);
    }

    #[test]
    fn non_finite_market_cap_is_missing() {
        let mut o = obs(1, 2010);
        o.price = f64::NAN;
        let rows = attach_exposures(vec![o], &[]);
        assert_eq!(rows[0].field(Field::MarketCap), None);
    }
}
