//! Pure mapping from provider payloads to dashboard records.
//!
//! Nothing here performs I/O or reads the clock; callers pass `now`/`today`.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

use crate::error::ProviderError;
use crate::provider::alphavantage::{CompanyOverview, FeedItem, GlobalQuote, TimeSeries};
use crate::{HistoricalPoint, MarketIndex, NewsItem, Quote, Symbol, Timeframe};

pub const NOT_AVAILABLE: &str = "N/A";

/// Upper bound on headlines taken from one news feed.
pub const NEWS_LIMIT: usize = 10;

/// Display-precision of index values (`4587.6400` renders as `4,587.64`).
const INDEX_FRACTION_DIGITS: usize = 3;

/// Percent value parsed from text such as `"+1.23%"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Percent {
    pub value: f64,
    /// Input with whitespace and the `%` removed, e.g. `"+1.23"`.
    pub text: String,
}

impl Percent {
    /// Zero counts as positive.
    pub fn is_positive(&self) -> bool {
        self.value >= 0.0
    }
}

pub fn parse_percent(raw: &str) -> Result<Percent, ProviderError> {
    let text = raw.trim().trim_end_matches('%').trim();
    let value = text
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(ProviderError::MissingField {
            field: "change percent",
        })?;

    Ok(Percent {
        value,
        text: text.to_owned(),
    })
}

/// Give `change` the sign of `percent`; the percent string is authoritative.
pub fn align_change_sign(change: f64, percent: &Percent) -> f64 {
    if percent.is_positive() {
        change.abs()
    } else {
        -change.abs()
    }
}

/// en-US digit grouping with at most `max_fraction_digits` decimals and
/// trailing zeros trimmed.
pub fn format_grouped(value: f64, max_fraction_digits: usize) -> String {
    if !value.is_finite() {
        return String::from(NOT_AVAILABLE);
    }

    let formatted = format!("{:.*}", max_fraction_digits, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, fraction.trim_end_matches('0')),
        None => (formatted.as_str(), ""),
    };

    let mut grouped = String::with_capacity(formatted.len() + integer.len() / 3 + 1);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if !fraction.is_empty() {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    let is_zero = grouped.chars().all(|ch| matches!(ch, '0' | ',' | '.'));
    if value < 0.0 && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Volume text parsed as a float, truncated, and grouped.
pub fn format_volume(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(volume) if volume.is_finite() => format_grouped(volume.trunc(), 0),
        _ => String::from(NOT_AVAILABLE),
    }
}

/// Raw capitalization in dollars rendered in billions, e.g. `2940.00B`.
pub fn format_market_cap(raw: Option<&str>) -> String {
    present(raw)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map(|value| format!("{:.2}B", value.trunc() / 1_000_000_000.0))
        .unwrap_or_else(|| String::from(NOT_AVAILABLE))
}

/// General-purpose T/B/M/K abbreviation; the quote transform uses
/// [`format_market_cap`] instead.
pub fn format_large_number(num: f64) -> String {
    const STEPS: [(f64, &str); 4] = [
        (1_000_000_000_000.0, "T"),
        (1_000_000_000.0, "B"),
        (1_000_000.0, "M"),
        (1_000.0, "K"),
    ];

    STEPS
        .iter()
        .find(|(threshold, _)| num >= *threshold)
        .map(|(threshold, suffix)| format!("{:.2}{suffix}", num / threshold))
        .unwrap_or_else(|| num.to_string())
}

/// `"<n> min(s) ago"`, `"<n> hour(s) ago"`, or `"<n> day(s) ago"`.
pub fn format_relative_time(published: OffsetDateTime, now: OffsetDateTime) -> String {
    let minutes = (now - published).whole_minutes().max(0);
    if minutes < 60 {
        return ago(minutes, "min");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return ago(hours, "hour");
    }

    ago(hours / 24, "day")
}

fn ago(count: i64, unit: &str) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} ago")
}

/// Accepts `YYYYMMDDTHHMMSS`, `YYYYMMDDTHHMM`, or RFC 3339. Compact forms are UTC.
pub fn parse_published_time(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }

    let (date, time) = raw.split_once('T')?;
    if date.len() != 8 || !(time.len() == 4 || time.len() == 6) {
        return None;
    }
    if !date.bytes().chain(time.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year = date[0..4].parse::<i32>().ok()?;
    let month = Month::try_from(date[4..6].parse::<u8>().ok()?).ok()?;
    let day = date[6..8].parse::<u8>().ok()?;
    let hour = time[0..2].parse::<u8>().ok()?;
    let minute = time[2..4].parse::<u8>().ok()?;
    let second = time.get(4..6).map_or(Some(0), |s| s.parse::<u8>().ok())?;

    let date = Date::from_calendar_date(year, month, day).ok()?;
    let time = Time::from_hms(hour, minute, second).ok()?;
    Some(PrimitiveDateTime::new(date, time).assume_utc())
}

/// Merge `GLOBAL_QUOTE` and `OVERVIEW` into one quote.
pub fn normalize_quote(
    symbol: &Symbol,
    quote: GlobalQuote,
    overview: CompanyOverview,
) -> Result<Quote, ProviderError> {
    let price = parse_number(quote.price.as_deref(), "05. price")?;
    let change = parse_number(quote.change.as_deref(), "09. change")?;
    let percent = parse_percent(present(quote.change_percent.as_deref()).ok_or(
        ProviderError::MissingField {
            field: "10. change percent",
        },
    )?)?;

    Ok(Quote {
        symbol: quote
            .symbol
            .unwrap_or_else(|| symbol.as_str().to_owned()),
        name: present_owned(overview.name).unwrap_or_else(|| symbol.as_str().to_owned()),
        price,
        change: align_change_sign(change, &percent),
        change_percent: percent.value,
        market_cap: format_market_cap(overview.market_capitalization.as_deref()),
        pe_ratio: or_not_available(overview.pe_ratio),
        dividend: present_owned(overview.dividend_yield)
            .map(|yield_text| format!("{yield_text}%"))
            .unwrap_or_else(|| String::from(NOT_AVAILABLE)),
        volume: quote
            .volume
            .as_deref()
            .map(format_volume)
            .unwrap_or_else(|| String::from(NOT_AVAILABLE)),
        avg_volume: None,
        high: or_not_available(quote.high),
        low: or_not_available(quote.low),
        open: or_not_available(quote.open),
        prev_close: or_not_available(quote.previous_close),
        fifty_two_week_high: or_not_available(overview.week_52_high),
        fifty_two_week_low: or_not_available(overview.week_52_low),
        description: present_owned(overview.description),
        sector: present_owned(overview.sector),
        industry: present_owned(overview.industry),
        exchange: present_owned(overview.exchange),
        currency: present_owned(overview.currency),
        country: present_owned(overview.country),
        eps: present_owned(overview.eps),
        profit_margin: present_owned(overview.profit_margin),
        beta: present_owned(overview.beta),
        moving_avg50: present_owned(overview.moving_average_50),
        moving_avg200: present_owned(overview.moving_average_200),
    })
}

/// Map an index proxy's `GLOBAL_QUOTE` to a market index summary.
pub fn normalize_market_index(
    name: &str,
    symbol: &str,
    quote: &GlobalQuote,
) -> Result<MarketIndex, ProviderError> {
    let price = parse_number(quote.price.as_deref(), "05. price")?;
    let percent = parse_percent(present(quote.change_percent.as_deref()).ok_or(
        ProviderError::MissingField {
            field: "10. change percent",
        },
    )?)?;
    let is_positive = percent.is_positive();
    let sign = if is_positive && !percent.text.starts_with('+') {
        "+"
    } else {
        ""
    };

    Ok(MarketIndex {
        name: name.to_owned(),
        symbol: symbol.to_owned(),
        value: format_grouped(price, INDEX_FRACTION_DIGITS),
        change: format!("{sign}{}%", percent.text),
        is_positive,
    })
}

/// First [`NEWS_LIMIT`] feed entries, numbered from 1.
pub fn normalize_news(feed: Vec<FeedItem>, now: OffsetDateTime) -> Vec<NewsItem> {
    feed.into_iter()
        .take(NEWS_LIMIT)
        .zip(1_u32..)
        .map(|(item, id)| NewsItem {
            id,
            time: parse_published_time(&item.time_published)
                .map(|published| format_relative_time(published, now))
                .unwrap_or_else(|| String::from(NOT_AVAILABLE)),
            title: item.title,
            source: item.source,
            url: item.url,
            summary: present_owned(item.summary),
            image: present_owned(item.banner_image),
        })
        .collect()
}

/// Pick and trim the series for `timeframe`, ascending by timestamp.
///
/// `1D` uses the intraday series restricted to `today`; every other
/// timeframe keeps the most recent N daily points. A `1D` request answered
/// with only a daily series is treated like `1M`.
pub fn select_series(
    series: TimeSeries,
    timeframe: Timeframe,
    today: Date,
) -> Result<Vec<HistoricalPoint>, ProviderError> {
    if timeframe.is_intraday() {
        if let Some(intraday) = series.intraday {
            let prefix = today.to_string();
            // "YYYY-MM-DD HH:MM:SS" keys sort chronologically as text.
            return intraday
                .into_iter()
                .filter(|(timestamp, _)| timestamp.starts_with(&prefix))
                .map(|(timestamp, entry)| {
                    parse_close(&entry.close).map(|value| HistoricalPoint::new(timestamp, value))
                })
                .collect();
        }
    }

    let Some(daily) = series.daily else {
        return Ok(Vec::new());
    };
    let limit = timeframe
        .daily_points()
        .or(Timeframe::default().daily_points())
        .unwrap_or(30);

    let mut dated = Vec::with_capacity(daily.len());
    for (key, entry) in daily {
        match Date::parse(&key, format_description!("[year]-[month]-[day]")) {
            Ok(date) => dated.push((date, key, parse_close(&entry.close)?)),
            Err(_) => tracing::debug!(key = %key, "skipping daily entry with invalid date"),
        }
    }
    dated.sort_by_key(|(date, _, _)| *date);

    let start = dated.len().saturating_sub(limit);
    Ok(dated
        .into_iter()
        .skip(start)
        .map(|(_, key, value)| HistoricalPoint::new(key, value))
        .collect())
}

fn parse_close(raw: &str) -> Result<f64, ProviderError> {
    parse_number(Some(raw), "4. close").map_err(|_| ProviderError::MalformedPayload)
}

fn parse_number(raw: Option<&str>, field: &'static str) -> Result<f64, ProviderError> {
    present(raw)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .ok_or(ProviderError::MissingField { field })
}

/// Provider placeholders for "no value".
fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty() && *value != "None" && *value != "-")
}

fn present_owned(raw: Option<String>) -> Option<String> {
    present(raw.as_deref()).map(str::to_owned)
}

fn or_not_available(raw: Option<String>) -> String {
    present_owned(raw).unwrap_or_else(|| String::from(NOT_AVAILABLE))
}
