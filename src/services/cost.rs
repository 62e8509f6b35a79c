//! Cost engine: pure storage-cost arithmetic
//!
//! Stateless functions over a normalized rate quote plus user-supplied
//! volume, versioning overhead, and copy add-ons. No I/O and no hidden
//! state; everything a caller needs goes in as an argument.

use super::pricing::{RateQuote, TierBand};
use serde::{Deserialize, Serialize};

/// GB per TB under the binary convention
pub const TB_CONVERSION_BINARY: f64 = 1024.0;
/// GB per TB under the decimal convention
pub const TB_CONVERSION_DECIMAL: f64 = 1000.0;

/// TB/GB conversion convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TbConversion {
    /// 1 TB = 1024 GB
    Binary,
    /// 1 TB = 1000 GB
    Decimal,
}

impl TbConversion {
    /// GB per TB for this convention
    pub fn factor(self) -> f64 {
        match self {
            Self::Binary => TB_CONVERSION_BINARY,
            Self::Decimal => TB_CONVERSION_DECIMAL,
        }
    }
}

/// Convert TB to GB
pub fn tb_to_gb(tb: f64, conversion: TbConversion) -> f64 {
    tb * conversion.factor()
}

/// Convert GB to TB; exact inverse of [`tb_to_gb`]
pub fn gb_to_tb(gb: f64, conversion: TbConversion) -> f64 {
    gb / conversion.factor()
}

/// Effective stored GB once versioning overhead is applied
///
/// `overhead_fraction` is in 0..=1 terms, e.g. 0.25 for 25% version history.
pub fn versioned_gb(base_gb: f64, overhead_fraction: f64) -> f64 {
    base_gb * (1.0 + overhead_fraction)
}

/// Cost multiplier from enabled copy add-ons: `1 + max(0, n)`
///
/// A negative add-on count clamps to zero rather than discounting below 1x.
pub fn copy_multiplier(num_copy_addons: i64) -> f64 {
    1.0 + num_copy_addons.max(0) as f64
}

/// Monthly cost at a single flat rate
pub fn cost_from_flat_rate(gb: f64, rate_per_gb_month: f64) -> f64 {
    gb * rate_per_gb_month
}

/// Blended monthly cost across tier bands
///
/// Bands must already be sorted ascending by `from_gb`; this function does
/// not sort. Each band bills `min(remaining, width)` GB, with an open-ended
/// band absorbing whatever volume is left.
pub fn cost_from_tiers(gb: f64, tiers: &[TierBand]) -> f64 {
    let mut total = 0.0;
    let mut remaining = gb;
    for band in tiers {
        if remaining <= 0.0 {
            break;
        }
        let band_size = match band.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        if band_size > 0.0 {
            total += band_size * band.rate_per_gb_month;
        }
        remaining -= band_size;
    }
    total
}

/// Monthly cost for a normalized quote, flat or tiered
pub fn cost_for_quote(gb: f64, quote: &RateQuote) -> f64 {
    match quote {
        RateQuote::Flat { rate_per_gb_month } => cost_from_flat_rate(gb, *rate_per_gb_month),
        RateQuote::Tiered { tiers } => cost_from_tiers(gb, tiers),
    }
}

/// AWS Backup monthly total: quoted cost scaled by copies plus a flat add-on
pub fn backup_total(base_gb: f64, quote: &RateQuote, copy_mult: f64, flat_addon_usd: f64) -> f64 {
    cost_for_quote(base_gb, quote) * copy_mult + flat_addon_usd
}

/// S3-with-versioning monthly total: versioned volume priced through the
/// quote, scaled by copies, plus a flat add-on
pub fn versioning_total(
    base_gb: f64,
    overhead_fraction: f64,
    quote: &RateQuote,
    copy_mult: f64,
    flat_addon_usd: f64,
) -> f64 {
    cost_for_quote(versioned_gb(base_gb, overhead_fraction), quote) * copy_mult + flat_addon_usd
}

/// Absolute delta against a reference cost
pub fn delta_usd(cost: f64, reference: f64) -> f64 {
    cost - reference
}

/// Percentage delta against a reference cost; 0 when the reference is 0
pub fn delta_pct(cost: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        return 0.0;
    }
    (cost - reference) / reference * 100.0
}

/// Inputs for a Backup-vs-versioning comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInputs {
    /// Base data volume in TB
    pub data_tb: f64,
    /// TB/GB convention
    pub conversion: TbConversion,
    /// Resolved Backup quote, when pricing succeeded
    pub backup_quote: Option<RateQuote>,
    /// Resolved S3 quote, when pricing succeeded
    pub s3_quote: Option<RateQuote>,
    /// Versioning overhead fraction applied to the S3 strategy
    pub versioning_overhead: f64,
    /// Enabled copy add-ons, applied to both strategies
    pub num_copy_addons: i64,
    /// Flat monthly add-on charge in USD, applied to both strategies
    pub flat_addon_usd: f64,
}

/// Cost breakdown for one storage strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyCost {
    /// Cost before copy multiplier and add-ons; `None` without a quote
    pub base_cost_usd: Option<f64>,
    /// Total monthly cost; `None` without a quote
    pub total_usd: Option<f64>,
    /// GB actually billed for this strategy
    pub effective_gb: f64,
    /// Copy multiplier applied
    pub copy_multiplier: f64,
}

/// Side-by-side monthly comparison of the two storage strategies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostComparison {
    /// Base volume in TB, as supplied
    pub data_tb: f64,
    /// Base volume in GB
    pub data_gb: f64,
    /// S3 volume after versioning overhead
    pub versioned_gb: f64,
    /// AWS Backup strategy breakdown
    pub aws_backup: StrategyCost,
    /// S3-with-versioning strategy breakdown
    pub s3_versioning: StrategyCost,
    /// S3 total minus the Backup reference; `None` without an S3 quote
    pub s3_delta_usd: Option<f64>,
    /// Same delta in percent; `None` without an S3 quote
    pub s3_delta_pct: Option<f64>,
}

/// Compare AWS Backup against S3-with-versioning for one volume
///
/// The Backup total is the delta reference; when Backup pricing is missing
/// the reference is 0 and the percentage delta reports 0 by the
/// zero-reference rule.
pub fn compare_backup_vs_versioning(inputs: &ComparisonInputs) -> CostComparison {
    let gb = tb_to_gb(inputs.data_tb, inputs.conversion);
    let copy_mult = copy_multiplier(inputs.num_copy_addons);
    let v_gb = versioned_gb(gb, inputs.versioning_overhead);

    let backup_base = inputs.backup_quote.as_ref().map(|q| cost_for_quote(gb, q));
    let backup_totaled = inputs
        .backup_quote
        .as_ref()
        .map(|q| backup_total(gb, q, copy_mult, inputs.flat_addon_usd));
    let s3_base = inputs.s3_quote.as_ref().map(|q| cost_for_quote(v_gb, q));
    let s3_totaled = inputs.s3_quote.as_ref().map(|q| {
        versioning_total(
            gb,
            inputs.versioning_overhead,
            q,
            copy_mult,
            inputs.flat_addon_usd,
        )
    });

    let reference = backup_totaled.unwrap_or(0.0);
    CostComparison {
        data_tb: inputs.data_tb,
        data_gb: gb,
        versioned_gb: v_gb,
        aws_backup: StrategyCost {
            base_cost_usd: backup_base,
            total_usd: backup_totaled,
            effective_gb: gb,
            copy_multiplier: copy_mult,
        },
        s3_versioning: StrategyCost {
            base_cost_usd: s3_base,
            total_usd: s3_totaled,
            effective_gb: v_gb,
            copy_multiplier: copy_mult,
        },
        s3_delta_usd: s3_totaled.map(|t| delta_usd(t, reference)),
        s3_delta_pct: s3_totaled.map(|t| delta_pct(t, reference)),
    }
}
