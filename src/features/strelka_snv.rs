//! Features of Strelka somatic SNV calls.
//!
//! Every call becomes one row combining the quality annotations of the caller with
//! depth, filtered-depth, spanning-deletion and alternate-allele ratios of the
//! normal and the tumor sample.

use std::borrow::Cow;

use anyhow::Context;
use getset::{CopyGetters, Getters};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::alleles::{alt_rates, nucleotide, AlleleCounts, AltAlleles, AltRates};
use crate::depth::ChromDepthIndex;
use crate::diagnostics::Diagnostics;
use crate::error::Error;
use crate::features::{FeatureExtractor, FeatureTable};
use crate::reader::RecordSource;
use crate::record::RawRecord;
use crate::sanitize::sanitize;
use crate::types::{FeatureValue, Nucleotide, SampleRole};

/// Identifier this extractor is registered under.
pub const NAME: &str = "strelka.snv";

/// Fields requested from the record source, in tuple order.
pub const FIELDS: [&str; 29] = [
    "CHROM",
    "POS",
    "REF",
    "ALT",
    "FILTER",
    "I.NT",
    "I.SOMATIC",
    "I.QSS_NT",
    "I.SGT",
    "I.MQ",
    "I.MQ0",
    "I.PNOISE",
    "I.PNOISE2",
    "I.SNVSB",
    "I.ReadPosRankSum",
    "S.1.SDP",
    "S.2.SDP",
    "S.1.FDP",
    "S.2.FDP",
    "S.1.DP",
    "S.2.DP",
    "S.1.AU",
    "S.2.AU",
    "S.1.CU",
    "S.2.CU",
    "S.1.GU",
    "S.2.GU",
    "S.1.TU",
    "S.2.TU",
];

/// Annotations Strelka does not always write; these default to 0 when absent.
pub const FIXABLE_FIELDS: [&str; 21] = [
    "I.QSS_NT",
    "I.MQ",
    "I.MQ0",
    "I.PNOISE",
    "I.PNOISE2",
    "I.SNVSB",
    "I.ReadPosRankSum",
    "S.1.SDP",
    "S.2.SDP",
    "S.1.FDP",
    "S.2.FDP",
    "S.1.DP",
    "S.2.DP",
    "S.1.AU",
    "S.2.AU",
    "S.1.CU",
    "S.2.CU",
    "S.1.GU",
    "S.2.GU",
    "S.1.TU",
    "S.2.TU",
];

/// Columns of the feature table, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
pub enum Column {
    #[strum(serialize = "CHROM")]
    Chrom,
    #[strum(serialize = "POS")]
    Pos,
    #[strum(serialize = "REF")]
    Ref,
    #[strum(serialize = "ALT")]
    Alt,
    #[strum(serialize = "NT")]
    Nt,
    #[strum(serialize = "NT_REF")]
    NtRef,
    #[strum(serialize = "QSS_NT")]
    QssNt,
    #[strum(serialize = "FILTER")]
    Filter,
    #[strum(serialize = "N_FDP_RATE")]
    NormalFdpRate,
    #[strum(serialize = "T_FDP_RATE")]
    TumorFdpRate,
    #[strum(serialize = "N_SDP_RATE")]
    NormalSdpRate,
    #[strum(serialize = "T_SDP_RATE")]
    TumorSdpRate,
    #[strum(serialize = "N_DP")]
    NormalDp,
    #[strum(serialize = "T_DP")]
    TumorDp,
    #[strum(serialize = "N_DP_RATE")]
    NormalDpRate,
    #[strum(serialize = "T_DP_RATE")]
    TumorDpRate,
    #[strum(serialize = "T_TIER1_ALT_RATE")]
    TumorTier1AltRate,
    #[strum(serialize = "T_TIER2_ALT_RATE")]
    TumorTier2AltRate,
    #[strum(serialize = "N_TIER1_ALT_RATE")]
    NormalTier1AltRate,
    #[strum(serialize = "N_TIER2_ALT_RATE")]
    NormalTier2AltRate,
    #[strum(serialize = "MQ_SCORE")]
    MqScore,
    #[strum(serialize = "MQ_ZERO_RATE")]
    MqZeroRate,
    #[strum(serialize = "PNOISE")]
    Pnoise,
    #[strum(serialize = "PNOISE2")]
    Pnoise2,
    #[strum(serialize = "SNVSB")]
    Snvsb,
    #[strum(serialize = "ReadPosRankSum")]
    ReadPosRankSum,
}

impl Column {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Columns used as classifier inputs. Tier2 alt rates are left out.
pub const TRAINING_COLUMNS: [Column; 16] = [
    Column::NtRef,
    Column::QssNt,
    Column::NormalFdpRate,
    Column::TumorFdpRate,
    Column::NormalSdpRate,
    Column::TumorSdpRate,
    Column::NormalDpRate,
    Column::TumorDpRate,
    Column::TumorTier1AltRate,
    Column::NormalTier1AltRate,
    Column::MqScore,
    Column::MqZeroRate,
    Column::Pnoise,
    Column::Pnoise2,
    Column::Snvsb,
    Column::ReadPosRankSum,
];

pub fn columns() -> Vec<&'static str> {
    Column::iter().map(Column::name).collect()
}

pub fn training_columns() -> Vec<&'static str> {
    TRAINING_COLUMNS.iter().map(|&column| column.name()).collect()
}

/// Per-sample depth features.
#[derive(Debug, Clone, Copy, Default, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct SampleFeatures {
    /// Filtered depth over total depth.
    fdp_rate: f64,
    /// Spanning-deletion depth over total plus spanning-deletion depth.
    sdp_rate: f64,
    /// Total depth.
    dp: f64,
    /// Total depth over the chromosome baseline; 0 without a baseline.
    dp_rate: f64,
    alt_rates: AltRates,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

impl SampleFeatures {
    fn from_record(
        record: &RawRecord,
        role: SampleRole,
        baseline: Option<f64>,
        reference: Nucleotide,
        alts: &AltAlleles,
    ) -> Result<Self, Error> {
        let fdp = record.format(role, "FDP")?;
        let sdp = record.format(role, "SDP")?;
        let dp = record.format(role, "DP")?;
        let counts = AlleleCounts::from_record(record, role)?;
        Ok(SampleFeatures {
            fdp_rate: ratio(fdp, dp),
            sdp_rate: ratio(sdp, dp + sdp),
            dp,
            dp_rate: baseline.map_or(0.0, |baseline| dp / baseline),
            alt_rates: alt_rates(reference, alts, &counts),
        })
    }
}

/// The features of one call.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct FeatureRow {
    #[getset(get = "pub")]
    chrom: String,
    #[getset(get_copy = "pub")]
    pos: i64,
    #[getset(get = "pub")]
    ref_allele: String,
    #[getset(get = "pub")]
    alt: String,
    /// Somatic genotype state of the normal, as written by the caller.
    #[getset(get = "pub")]
    nt: String,
    #[getset(get_copy = "pub")]
    qss_nt: i64,
    #[getset(get = "pub")]
    filter: String,
    #[getset(get_copy = "pub")]
    normal: SampleFeatures,
    #[getset(get_copy = "pub")]
    tumor: SampleFeatures,
    /// `None` if the annotation is not a number.
    #[getset(get_copy = "pub")]
    mq_score: Option<f64>,
    #[getset(get_copy = "pub")]
    mq_zero_rate: Option<f64>,
    #[getset(get = "pub")]
    pnoise: FeatureValue,
    #[getset(get = "pub")]
    pnoise2: FeatureValue,
    #[getset(get = "pub")]
    snvsb: FeatureValue,
    #[getset(get = "pub")]
    read_pos_rank_sum: FeatureValue,
}

impl FeatureRow {
    /// 1 if the normal is called reference (`NT=ref`), else 0.
    pub fn nt_ref(&self) -> i64 {
        (self.nt == "ref") as i64
    }

    pub fn value(&self, column: Column) -> FeatureValue {
        match column {
            Column::Chrom => self.chrom.as_str().into(),
            Column::Pos => self.pos.into(),
            Column::Ref => self.ref_allele.as_str().into(),
            Column::Alt => self.alt.as_str().into(),
            Column::Nt => self.nt.as_str().into(),
            Column::NtRef => self.nt_ref().into(),
            Column::QssNt => self.qss_nt.into(),
            Column::Filter => self.filter.as_str().into(),
            Column::NormalFdpRate => self.normal.fdp_rate.into(),
            Column::TumorFdpRate => self.tumor.fdp_rate.into(),
            Column::NormalSdpRate => self.normal.sdp_rate.into(),
            Column::TumorSdpRate => self.tumor.sdp_rate.into(),
            Column::NormalDp => self.normal.dp.into(),
            Column::TumorDp => self.tumor.dp.into(),
            Column::NormalDpRate => self.normal.dp_rate.into(),
            Column::TumorDpRate => self.tumor.dp_rate.into(),
            Column::TumorTier1AltRate => self.tumor.alt_rates.tier1.into(),
            Column::TumorTier2AltRate => self.tumor.alt_rates.tier2.into(),
            Column::NormalTier1AltRate => self.normal.alt_rates.tier1.into(),
            Column::NormalTier2AltRate => self.normal.alt_rates.tier2.into(),
            Column::MqScore => self.mq_score.into(),
            Column::MqZeroRate => self.mq_zero_rate.into(),
            Column::Pnoise => self.pnoise.clone(),
            Column::Pnoise2 => self.pnoise2.clone(),
            Column::Snvsb => self.snvsb.clone(),
            Column::ReadPosRankSum => self.read_pos_rank_sum.clone(),
        }
    }

    pub fn values(&self) -> Vec<FeatureValue> {
        Column::iter().map(|column| self.value(column)).collect()
    }
}

fn copied(record: &RawRecord, field: &str) -> FeatureValue {
    record
        .get(field)
        .filter(|value| !value.is_missing())
        .map_or(FeatureValue::Integer(0), FeatureValue::from)
}

/// Build the features of one sanitized record.
pub fn build_row(
    record: &RawRecord,
    depths: &ChromDepthIndex,
    diagnostics: &mut Diagnostics,
) -> Result<FeatureRow, Error> {
    let chrom = record.chrom()?;
    let reference = record.ref_allele()?;
    let alt_alleles = record.alt_alleles()?;
    let ref_base = nucleotide(reference)?;
    let alts = AltAlleles::parse(&alt_alleles)?;
    let baseline = depths.baseline(chrom, diagnostics);

    Ok(FeatureRow {
        chrom: chrom.into(),
        pos: record.pos()?,
        ref_allele: reference.into(),
        alt: alt_alleles.join(","),
        nt: record.text("I.NT")?.into(),
        qss_nt: record.integer("I.QSS_NT")?,
        filter: record.filters()?.join(","),
        normal: SampleFeatures::from_record(record, SampleRole::Normal, baseline, ref_base, &alts)?,
        tumor: SampleFeatures::from_record(record, SampleRole::Tumor, baseline, ref_base, &alts)?,
        mq_score: record.get("I.MQ").and_then(|value| value.float()),
        mq_zero_rate: record.get("I.MQ0").and_then(|value| value.float()),
        pnoise: copied(record, "I.PNOISE"),
        pnoise2: copied(record, "I.PNOISE2"),
        snvsb: copied(record, "I.SNVSB"),
        read_pos_rank_sum: copied(record, "I.ReadPosRankSum"),
    })
}

/// Feature extractor for Strelka somatic SNV calls.
///
/// The chromosome baseline depths come from the `##maxDepth_<CHROM>` header
/// directives unless a non-empty index is supplied up front.
#[derive(Debug, Clone, Default)]
pub struct StrelkaSnvFeatures {
    chrom_depth: Option<ChromDepthIndex>,
}

impl StrelkaSnvFeatures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `chrom_depth` instead of scanning the header.
    pub fn with_chrom_depth(mut self, chrom_depth: ChromDepthIndex) -> Self {
        self.chrom_depth = Some(chrom_depth);
        self
    }
}

impl FeatureExtractor for StrelkaSnvFeatures {
    fn name(&self) -> &'static str {
        NAME
    }

    fn collect(
        &self,
        source: &mut dyn RecordSource,
        diagnostics: &mut Diagnostics,
    ) -> anyhow::Result<FeatureTable> {
        let depths = match &self.chrom_depth {
            Some(index) if !index.is_empty() => Cow::Borrowed(index),
            _ => Cow::Owned(
                ChromDepthIndex::from_header_lines(source.header_lines())
                    .context("cannot read baseline depths from header")?,
            ),
        };

        let mut table = FeatureTable::new(columns());
        for (i, values) in source.records(&FIELDS).enumerate() {
            let row = values
                .and_then(|values| {
                    let record = RawRecord::from_values(&FIELDS, values)?;
                    let record = sanitize(record, &FIXABLE_FIELDS, diagnostics);
                    Ok(build_row(&record, &depths, diagnostics)?)
                })
                .with_context(|| format!("cannot extract features of record {}", i + 1))?;
            table.push_row(row.values());
        }
        log::debug!(
            "extracted {} rows, {} diagnostics",
            table.len(),
            diagnostics.len()
        );
        Ok(table)
    }

    fn columns(&self) -> Vec<&'static str> {
        columns()
    }

    fn training_columns(&self) -> Vec<&'static str> {
        training_columns()
    }
}
