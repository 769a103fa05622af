use reqwest::Url;
use serde::Deserialize;
use serde_with::{DefaultOnNull, NoneAsEmptyString, serde_as};

use crate::quantity::rate::KilowattHourRate;

/// One page of the standard unit rates.
#[serde_as]
#[derive(Clone, Debug, Deserialize)]
pub struct Page {
    pub results: Vec<PriceRecord>,

    /// Cursor to the next page, `null` or empty on the last one.
    #[serde_as(as = "DefaultOnNull<NoneAsEmptyString>")]
    #[serde(default)]
    pub next: Option<Url>,
}

/// Raw half-hourly price.
///
/// The timestamps are left unparsed, so that a single malformed record
/// does not fail the entire page.
#[derive(Clone, Debug, Deserialize)]
pub struct PriceRecord {
    #[serde(deserialize_with = "KilowattHourRate::deserialize_pence")]
    pub value_inc_vat: KilowattHourRate,

    pub valid_from: String,
    pub valid_to: String,
}
