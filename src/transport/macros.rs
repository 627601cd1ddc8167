//! Device-identity macro resolution.
//!
//! Carrier-provisioned MMSC URL templates and extra header values may embed
//! `##MACRO##` tokens that stand for line-identity values only the device
//! knows. Resolution is a pure pass over the input: two collaborator lookups,
//! no retained state.

use crate::config::schema::MmsConfig;
use crate::telephony::{SubscriptionId, SubscriptionSource, Telephony};

/// The device's own line number.
pub const MACRO_LINE1: &str = "LINE1";
/// The device's own line number with the country code stripped.
pub const MACRO_LINE1NOCOUNTRYCODE: &str = "LINE1NOCOUNTRYCODE";

const MACRO_DELIMITER: &str = "##";

/// Everything one macro-resolution pass needs. Built per pass, not retained.
pub struct MacroContext<'a> {
    pub sub_id: SubscriptionId,
    pub config: &'a MmsConfig,
    pub telephony: &'a dyn Telephony,
    pub subscriptions: &'a dyn SubscriptionSource,
}

impl<'a> MacroContext<'a> {
    pub fn new(
        sub_id: SubscriptionId,
        config: &'a MmsConfig,
        telephony: &'a dyn Telephony,
        subscriptions: &'a dyn SubscriptionSource,
    ) -> Self {
        Self {
            sub_id,
            config,
            telephony,
            subscriptions,
        }
    }
}

/// Resolve a single macro name to its value.
///
/// `None` means the macro is not in the supported set; a supported macro
/// with no underlying value resolves to an empty string, not an error.
pub fn resolve_macro(name: &str, ctx: &MacroContext<'_>) -> Option<String> {
    match name {
        MACRO_LINE1 => Some(line1_number(ctx)),
        MACRO_LINE1NOCOUNTRYCODE => Some(strip_country_code(&line1_number(ctx))),
        _ => {
            tracing::warn!(macro_name = name, "unsupported mms macro");
            None
        }
    }
}

/// Substitute every `##MACRO##` token in `input`.
///
/// Tokens that resolve are replaced; unsupported or unterminated tokens are
/// left in place so a malformed template stays visible downstream.
pub fn resolve_macros(input: &str, ctx: &MacroContext<'_>) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(MACRO_DELIMITER) {
        let after_open = &rest[start + MACRO_DELIMITER.len()..];
        let Some(len) = after_open.find(MACRO_DELIMITER) else {
            // Unterminated token; keep the tail as-is.
            break;
        };
        let name = &after_open[..len];
        output.push_str(&rest[..start]);
        match resolve_macro(name, ctx) {
            Some(value) => output.push_str(&value),
            None => {
                output.push_str(MACRO_DELIMITER);
                output.push_str(name);
                output.push_str(MACRO_DELIMITER);
            }
        }
        rest = &after_open[len + MACRO_DELIMITER.len()..];
    }

    output.push_str(rest);
    output
}

/// The line number for the context's subscription.
///
/// Order is fixed: the device-reported number wins, the carrier-provisioned
/// subscription number is the fallback, and an empty string is the result
/// when neither is available. The fallback lookup must not run when the
/// primary yields a value.
fn line1_number(ctx: &MacroContext<'_>) -> String {
    ctx.telephony
        .line1_number(ctx.sub_id)
        .filter(|number| !number.is_empty())
        .or_else(|| {
            ctx.subscriptions
                .phone_number(ctx.sub_id)
                .filter(|number| !number.is_empty())
        })
        .unwrap_or_default()
}

/// Strip the country calling code from an E.164-style number.
///
/// Keeps the trailing 10-digit national part of `+`-prefixed values and
/// drops formatting characters. Values without a leading `+` pass through
/// unchanged.
pub fn strip_country_code(number: &str) -> String {
    match number.strip_prefix('+') {
        Some(rest) => {
            let digits: String = rest.chars().filter(|c| c.is_ascii_digit()).collect();
            if digits.len() > 10 {
                digits[digits.len() - 10..].to_string()
            } else {
                digits
            }
        }
        None => number.to_string(),
    }
}
