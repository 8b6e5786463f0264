//! Formatted time argument parser.
//!
//! Parses one argument with a [`chrono` format string](chrono::format::strftime)
//! and stores the result in the call context as a `DateTime<Utc>`.
//!
//! Formats with an offset (`%z`, `%:z`) are honoured and converted to UTC.
//! Formats without an offset are read as UTC. Fields the format leaves out
//! take their zero value: year 0, January, the 1st, 00:00:00.

use chrono::format::{ParseResult, Parsed, StrftimeItems};
use chrono::{DateTime, ParseError, Utc};
use shimroute_core::{ChaincodeStub, Context, InvokeError, Response};

use crate::middleware::{Middleware, Next};

/// Middleware that parses a time argument into the context.
///
/// # Example
///
/// ```
/// use shimroute_middleware::TimestampParser;
///
/// let parser = TimestampParser::new(0, "%Y-%m-%dT%H:%M:%S%:z", "issued_at");
/// assert_eq!(parser.format(), "%Y-%m-%dT%H:%M:%S%:z");
/// ```
#[derive(Debug, Clone)]
pub struct TimestampParser {
    arg_index: usize,
    format: String,
    context_key: String,
}

impl TimestampParser {
    /// Creates a parser for the argument at `arg_index`.
    pub fn new(
        arg_index: usize,
        format: impl Into<String>,
        context_key: impl Into<String>,
    ) -> Self {
        Self {
            arg_index,
            format: format.into(),
            context_key: context_key.into(),
        }
    }

    /// Returns the time format.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Returns the key the parsed time is stored under.
    #[must_use]
    pub fn context_key(&self) -> &str {
        &self.context_key
    }
}

impl Middleware for TimestampParser {
    fn name(&self) -> &'static str {
        "timestamp_parser"
    }

    fn process(
        &self,
        stub: &dyn ChaincodeStub,
        args: &[String],
        ctx: &mut Context,
        next: Next<'_>,
    ) -> Response {
        let Some(raw) = args.get(self.arg_index) else {
            let err = InvokeError::ArgIndex {
                operation: "error parsing time",
                index: self.arg_index,
                len: args.len(),
            };
            tracing::error!(call_id = %ctx.call_id(), error = %err, "time argument missing");
            return err.into();
        };

        let ts = match parse_utc(raw, &self.format) {
            Ok(ts) => ts,
            Err(e) => {
                let err = InvokeError::TimeParse(e);
                tracing::error!(
                    call_id = %ctx.call_id(),
                    arg_index = self.arg_index,
                    format = %self.format,
                    error = %err,
                    "time argument rejected"
                );
                return err.into();
            }
        };

        ctx.insert(self.context_key.clone(), ts);
        next.run(stub, args, ctx)
    }
}

/// Parses `value` with `format` into a UTC date-time.
///
/// Partial layouts are completed with zero values, so `"%Y-%m"` reads
/// `"2017-07"` as midnight on 1 July 2017 and `"%H:%M"` reads `"15:04"` as
/// 15:04 on 1 January of year 0.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use shimroute_middleware::stages::timestamp::parse_utc;
///
/// let ts = parse_utc("2017-07", "%Y-%m").unwrap();
/// assert_eq!(ts, Utc.with_ymd_and_hms(2017, 7, 1, 0, 0, 0).unwrap());
/// ```
pub fn parse_utc(value: &str, format: &str) -> Result<DateTime<Utc>, ParseError> {
    let mut parsed = Parsed::new();
    chrono::format::parse(&mut parsed, value, StrftimeItems::new(format))?;

    // A Unix timestamp already pins every field.
    if parsed.timestamp().is_none() {
        fill_unset(&mut parsed)?;
    }

    if parsed.offset().is_some() {
        parsed.to_datetime().map(|dt| dt.with_timezone(&Utc))
    } else {
        parsed.to_naive_datetime_with_offset(0).map(|dt| dt.and_utc())
    }
}

fn fill_unset(parsed: &mut Parsed) -> ParseResult<()> {
    let has_year = parsed.year().is_some()
        || parsed.year_div_100().is_some()
        || parsed.year_mod_100().is_some()
        || parsed.isoyear().is_some();
    if !has_year {
        parsed.set_year(0)?;
    }

    // Ordinal and week-based dates resolve the day on their own.
    let has_day_of_year = parsed.ordinal().is_some()
        || parsed.isoweek().is_some()
        || parsed.week_from_sun().is_some()
        || parsed.week_from_mon().is_some();
    if !has_day_of_year {
        if parsed.month().is_none() {
            parsed.set_month(1)?;
        }
        if parsed.day().is_none() {
            parsed.set_day(1)?;
        }
    }

    match (parsed.hour_div_12(), parsed.hour_mod_12()) {
        (None, None) => parsed.set_hour(0)?,
        // 12-hour clock without %p reads as AM.
        (None, Some(_)) => parsed.set_ampm(false)?,
        _ => {}
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    if parsed.second().is_none() {
        parsed.set_second(0)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shimroute_core::handler_fn;
    use shimroute_test::MockStub;

    fn run(parser: TimestampParser, call_args: &[&str]) -> (Response, Context) {
        let stub = MockStub::new("test");
        let call_args: Vec<String> = call_args.iter().map(|a| (*a).to_string()).collect();
        let handler = handler_fn(|_stub, _args, _ctx| Response::ok(Vec::new()));
        let chain = [parser.boxed()];
        let mut ctx = Context::new();
        let rsp = Next::new(&chain, &handler).run(&stub, &call_args, &mut ctx);
        (rsp, ctx)
    }

    #[test]
    fn test_rfc3339_with_offset() {
        let (rsp, ctx) = run(
            TimestampParser::new(0, "%Y-%m-%dT%H:%M:%S%:z", "ts"),
            &["2017-07-14T12:00:00+02:00"],
        );
        assert_eq!(rsp.status(), 200);
        assert_eq!(
            ctx.get::<DateTime<Utc>>("ts"),
            Some(&Utc.with_ymd_and_hms(2017, 7, 14, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_format_without_offset_reads_utc() {
        let (_, ctx) = run(
            TimestampParser::new(0, "%Y-%m-%d %H:%M", "ts"),
            &["2020-01-02 03:04"],
        );
        assert_eq!(
            ctx.get::<DateTime<Utc>>("ts"),
            Some(&Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 0).unwrap())
        );
    }

    #[test]
    fn test_date_only_format_reads_midnight() {
        let (_, ctx) = run(TimestampParser::new(0, "%d/%m/%Y", "day"), &["31/12/2019"]);
        assert_eq!(
            ctx.get::<DateTime<Utc>>("day"),
            Some(&Utc.with_ymd_and_hms(2019, 12, 31, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_month_layout_defaults_to_first_day() {
        assert_eq!(
            parse_utc("2017-07", "%Y-%m").unwrap(),
            Utc.with_ymd_and_hms(2017, 7, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_time_only_layout_defaults_to_year_zero() {
        let (rsp, ctx) = run(TimestampParser::new(0, "%H:%M", "at"), &["15:04"]);
        assert_eq!(rsp.status(), 200);
        assert_eq!(
            ctx.get::<DateTime<Utc>>("at"),
            Some(&Utc.with_ymd_and_hms(0, 1, 1, 15, 4, 0).unwrap())
        );
    }

    #[test]
    fn test_partial_layout_with_offset() {
        assert_eq!(
            parse_utc("15:04 +0200", "%H:%M %z").unwrap(),
            Utc.with_ymd_and_hms(0, 1, 1, 13, 4, 0).unwrap()
        );
    }

    #[test]
    fn test_twelve_hour_clock_without_meridiem_is_morning() {
        assert_eq!(
            parse_utc("2020-05-06 03:15", "%Y-%m-%d %I:%M").unwrap(),
            Utc.with_ymd_and_hms(2020, 5, 6, 3, 15, 0).unwrap()
        );
    }

    #[test]
    fn test_unix_timestamp_layout() {
        assert_eq!(
            parse_utc("1500000000", "%s").unwrap(),
            Utc.timestamp_opt(1_500_000_000, 0).unwrap()
        );
    }

    #[test]
    fn test_ordinal_date_layout() {
        assert_eq!(
            parse_utc("2019-032", "%Y-%j").unwrap(),
            Utc.with_ymd_and_hms(2019, 2, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_unparsable_time_is_bad_request() {
        let (rsp, ctx) = run(TimestampParser::new(0, "%Y-%m-%d", "ts"), &["yesterday"]);
        assert_eq!(rsp.status(), 400);
        assert!(rsp.message().starts_with("error parsing time string: "));
        assert!(!ctx.contains_key("ts"));
    }

    #[test]
    fn test_index_out_of_range_is_internal_error() {
        let (rsp, _) = run(TimestampParser::new(2, "%Y", "ts"), &["2019", "2020"]);
        assert_eq!(
            rsp,
            Response::error(500, "error parsing time: argIndex 2 out of range for 2 args")
        );
    }
}
