use std::ops::{Add, Index};
use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::error::Error;
use crate::record::RawRecord;
use crate::types::{Nucleotide, SampleRole, NO_CALL};

/// Read support for one allele at tier1 and tier2.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TierCounts(pub [f64; 2]);

impl TierCounts {
    pub fn tier1(&self) -> f64 {
        self.0[0]
    }

    pub fn tier2(&self) -> f64 {
        self.0[1]
    }
}

impl Add for TierCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        TierCounts([self.0[0] + other.0[0], self.0[1] + other.0[1]])
    }
}

/// Tier counts of every nucleotide for one sample, i.e. its `AU`, `CU`, `GU`, `TU`
/// FORMAT fields.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlleleCounts([TierCounts; 4]);

impl AlleleCounts {
    pub fn new(a: TierCounts, c: TierCounts, g: TierCounts, t: TierCounts) -> Self {
        AlleleCounts([a, c, g, t])
    }

    pub fn from_record(record: &RawRecord, role: SampleRole) -> Result<Self, Error> {
        let mut counts = Self::default();
        for base in Nucleotide::iter() {
            let field = role.count_field(base);
            let value = record.require(&field)?;
            let pair = value.tier_pair().ok_or_else(|| Error::InvalidNumber {
                field,
                value: value.clone(),
            })?;
            counts.0[base as usize] = TierCounts(pair);
        }
        Ok(counts)
    }
}

impl Index<Nucleotide> for AlleleCounts {
    type Output = TierCounts;

    fn index(&self, base: Nucleotide) -> &TierCounts {
        &self.0[base as usize]
    }
}

/// The ALT column of an SNV call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AltAlleles {
    /// The caller reported no alternate allele (`.`).
    NoCall,
    Alleles(Vec<Nucleotide>),
}

impl AltAlleles {
    /// Interpret ALT items. Only a lone `.` is the no-call sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use strelka_features::{AltAlleles, Nucleotide};
    ///
    /// assert_eq!(AltAlleles::parse(&["."]).unwrap(), AltAlleles::NoCall);
    /// assert_eq!(
    ///     AltAlleles::parse(&["G", "T"]).unwrap(),
    ///     AltAlleles::Alleles(vec![Nucleotide::G, Nucleotide::T])
    /// );
    /// assert!(AltAlleles::parse(&["GA"]).is_err());
    /// ```
    pub fn parse<S: AsRef<str>>(alleles: &[S]) -> Result<Self, Error> {
        if let [single] = alleles {
            if single.as_ref() == NO_CALL {
                return Ok(AltAlleles::NoCall);
            }
        }
        alleles
            .iter()
            .map(|allele| nucleotide(allele.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(AltAlleles::Alleles)
    }
}

pub fn nucleotide(allele: &str) -> Result<Nucleotide, Error> {
    Nucleotide::from_str(allele).map_err(|_| Error::UnknownAllele {
        allele: allele.into(),
    })
}

/// Alternate allele fractions of one sample at tier1 and tier2.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AltRates {
    pub tier1: f64,
    pub tier2: f64,
}

fn fraction(alt: f64, reference: f64) -> f64 {
    let total = alt + reference;
    if total == 0.0 {
        0.0
    } else {
        alt / total
    }
}

/// Fraction of alternate-allele support at each tier.
///
/// Alternate support is summed over all alternate alleles and is zero for a no-call
/// site. A tier without any reference or alternate support has a rate of 0.
///
/// # Examples
///
/// ```
/// use strelka_features::{alt_rates, AlleleCounts, AltAlleles, Nucleotide, TierCounts};
///
/// let counts = AlleleCounts::new(
///     TierCounts([10.0, 5.0]),
///     TierCounts::default(),
///     TierCounts([2.0, 1.0]),
///     TierCounts::default(),
/// );
/// let rates = alt_rates(Nucleotide::A, &AltAlleles::Alleles(vec![Nucleotide::G]), &counts);
/// assert!((rates.tier1 - 2.0 / 12.0).abs() < 1e-12);
/// assert!((rates.tier2 - 1.0 / 6.0).abs() < 1e-12);
/// ```
pub fn alt_rates(reference: Nucleotide, alts: &AltAlleles, counts: &AlleleCounts) -> AltRates {
    let ref_counts = counts[reference];
    let alt_counts = match alts {
        AltAlleles::NoCall => TierCounts::default(),
        AltAlleles::Alleles(alleles) => alleles
            .iter()
            .fold(TierCounts::default(), |sum, &base| sum + counts[base]),
    };
    AltRates {
        tier1: fraction(alt_counts.tier1(), ref_counts.tier1()),
        tier2: fraction(alt_counts.tier2(), ref_counts.tier2()),
    }
}
