//! Filtered MMS configuration records.
//!
//! This module defines the fixed, typed key set an MMS transaction needs and
//! the projection from a raw carrier bundle down to it. The projection is
//! total: every field is populated, falling back to the carrier default when
//! the provider omits a key, and unknown provider keys are dropped.

use serde::{Deserialize, Serialize};

use crate::config::bundle::{keys, CarrierBundle};

/// MMS configuration for one subscription.
///
/// Immutable once produced by [`filter_bundle`]; the cache hands out copies,
/// so callers may freely mutate their own record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MmsConfig {
    /// Append the transaction ID to the MMSC URL when downloading.
    pub append_transaction_id: bool,

    /// MMS send/receive is enabled for this subscription.
    pub mms_enabled: bool,

    /// Group conversations go out as a single MMS.
    pub group_mms_enabled: bool,

    /// Reply to WAP pushes with a NotifyResp through the MMSC.
    pub notify_wap_mmsc_enabled: bool,

    /// Sender aliases are supported.
    pub alias_enabled: bool,

    /// Audio attachments are allowed.
    pub allow_attach_audio: bool,

    /// Long SMS may be split into multipart SMS.
    pub multipart_sms_enabled: bool,

    /// SMS delivery reports are supported.
    pub sms_delivery_report_enabled: bool,

    /// The MMSC honors the Content-Disposition header.
    pub support_mms_content_disposition: bool,

    /// Send each part of a multipart SMS as an individual message.
    pub send_multipart_sms_as_separate_messages: bool,

    /// MMS read reports are supported.
    pub mms_read_report_enabled: bool,

    /// MMS delivery reports are supported.
    pub mms_delivery_report_enabled: bool,

    /// Ask the MMSC to close the connection after each transaction.
    pub close_connection: bool,

    /// Show app links for received cell broadcasts.
    pub show_cell_broadcast_app_links: bool,

    /// Append a charset parameter to the Content-Type header.
    pub support_http_charset_header: bool,

    /// Maximum MMS payload size in bytes.
    pub max_message_size: i32,

    /// Maximum width for attached images, in pixels.
    pub max_image_width: i32,

    /// Maximum height for attached images, in pixels.
    pub max_image_height: i32,

    /// Maximum number of recipients per message.
    pub recipient_limit: i32,

    /// Minimum alias length in characters.
    pub alias_min_chars: i32,

    /// Maximum alias length in characters.
    pub alias_max_chars: i32,

    /// Number of SMS segments before converting to MMS (-1 = never).
    pub sms_to_mms_text_threshold: i32,

    /// Text length before converting to MMS (-1 = never).
    pub sms_to_mms_text_length_threshold: i32,

    /// Maximum size of the text part of an MMS (-1 = unlimited).
    pub message_text_max_size: i32,

    /// Maximum subject length in characters.
    pub subject_max_length: i32,

    /// Socket timeout for MMSC transactions, in milliseconds.
    pub http_socket_timeout: i32,

    /// Header name used for the UAProf URL.
    pub ua_prof_tag_name: String,

    /// User-Agent sent to the MMSC when the caller supplies none.
    pub user_agent: String,

    /// UAProf URL advertised to the MMSC; empty disables the header.
    pub ua_prof_url: String,

    /// Extra HTTP headers, `|`-separated `Name: Value` pairs. Values may
    /// contain `##MACRO##` tokens.
    pub http_params: String,

    /// Gateway number for email-to-MMS, if the carrier has one.
    pub email_gateway_number: String,

    /// Suffix appended to the network access identifier.
    pub nai_suffix: String,
}

impl Default for MmsConfig {
    fn default() -> Self {
        Self {
            append_transaction_id: false,
            mms_enabled: true,
            group_mms_enabled: true,
            notify_wap_mmsc_enabled: false,
            alias_enabled: false,
            allow_attach_audio: true,
            multipart_sms_enabled: true,
            sms_delivery_report_enabled: true,
            support_mms_content_disposition: true,
            send_multipart_sms_as_separate_messages: false,
            mms_read_report_enabled: false,
            mms_delivery_report_enabled: false,
            close_connection: false,
            show_cell_broadcast_app_links: true,
            support_http_charset_header: false,
            max_message_size: 300 * 1024,
            max_image_width: 632,
            max_image_height: 480,
            recipient_limit: i32::MAX,
            alias_min_chars: 2,
            alias_max_chars: 48,
            sms_to_mms_text_threshold: -1,
            sms_to_mms_text_length_threshold: -1,
            message_text_max_size: -1,
            subject_max_length: 40,
            http_socket_timeout: 60 * 1000,
            ua_prof_tag_name: "x-wap-profile".to_string(),
            user_agent: String::new(),
            ua_prof_url: String::new(),
            http_params: String::new(),
            email_gateway_number: String::new(),
            nai_suffix: String::new(),
        }
    }
}

/// Project a raw carrier bundle down to the MMS key set.
///
/// Pure function: independent of any cache state, so provider responses can
/// be normalized uniformly wherever they are obtained.
pub fn filter_bundle(bundle: &CarrierBundle) -> MmsConfig {
    let d = MmsConfig::default();
    MmsConfig {
        append_transaction_id: bundle.get_bool(keys::APPEND_TRANSACTION_ID, d.append_transaction_id),
        mms_enabled: bundle.get_bool(keys::MMS_ENABLED, d.mms_enabled),
        group_mms_enabled: bundle.get_bool(keys::GROUP_MMS_ENABLED, d.group_mms_enabled),
        notify_wap_mmsc_enabled: bundle.get_bool(keys::NOTIFY_WAP_MMSC_ENABLED, d.notify_wap_mmsc_enabled),
        alias_enabled: bundle.get_bool(keys::ALIAS_ENABLED, d.alias_enabled),
        allow_attach_audio: bundle.get_bool(keys::ALLOW_ATTACH_AUDIO, d.allow_attach_audio),
        multipart_sms_enabled: bundle.get_bool(keys::MULTIPART_SMS_ENABLED, d.multipart_sms_enabled),
        sms_delivery_report_enabled: bundle.get_bool(
            keys::SMS_DELIVERY_REPORT_ENABLED,
            d.sms_delivery_report_enabled,
        ),
        support_mms_content_disposition: bundle.get_bool(
            keys::SUPPORT_MMS_CONTENT_DISPOSITION,
            d.support_mms_content_disposition,
        ),
        send_multipart_sms_as_separate_messages: bundle.get_bool(
            keys::SEND_MULTIPART_SMS_AS_SEPARATE_MESSAGES,
            d.send_multipart_sms_as_separate_messages,
        ),
        mms_read_report_enabled: bundle.get_bool(keys::MMS_READ_REPORT_ENABLED, d.mms_read_report_enabled),
        mms_delivery_report_enabled: bundle.get_bool(
            keys::MMS_DELIVERY_REPORT_ENABLED,
            d.mms_delivery_report_enabled,
        ),
        close_connection: bundle.get_bool(keys::CLOSE_CONNECTION, d.close_connection),
        show_cell_broadcast_app_links: bundle.get_bool(
            keys::SHOW_CELL_BROADCAST_APP_LINKS,
            d.show_cell_broadcast_app_links,
        ),
        support_http_charset_header: bundle.get_bool(
            keys::SUPPORT_HTTP_CHARSET_HEADER,
            d.support_http_charset_header,
        ),
        max_message_size: bundle.get_int(keys::MAX_MESSAGE_SIZE, d.max_message_size),
        max_image_width: bundle.get_int(keys::MAX_IMAGE_WIDTH, d.max_image_width),
        max_image_height: bundle.get_int(keys::MAX_IMAGE_HEIGHT, d.max_image_height),
        recipient_limit: bundle.get_int(keys::RECIPIENT_LIMIT, d.recipient_limit),
        alias_min_chars: bundle.get_int(keys::ALIAS_MIN_CHARS, d.alias_min_chars),
        alias_max_chars: bundle.get_int(keys::ALIAS_MAX_CHARS, d.alias_max_chars),
        sms_to_mms_text_threshold: bundle.get_int(keys::SMS_TO_MMS_TEXT_THRESHOLD, d.sms_to_mms_text_threshold),
        sms_to_mms_text_length_threshold: bundle.get_int(
            keys::SMS_TO_MMS_TEXT_LENGTH_THRESHOLD,
            d.sms_to_mms_text_length_threshold,
        ),
        message_text_max_size: bundle.get_int(keys::MESSAGE_TEXT_MAX_SIZE, d.message_text_max_size),
        subject_max_length: bundle.get_int(keys::SUBJECT_MAX_LENGTH, d.subject_max_length),
        http_socket_timeout: bundle.get_int(keys::HTTP_SOCKET_TIMEOUT, d.http_socket_timeout),
        ua_prof_tag_name: bundle.get_str(keys::UA_PROF_TAG_NAME, &d.ua_prof_tag_name),
        user_agent: bundle.get_str(keys::USER_AGENT, &d.user_agent),
        ua_prof_url: bundle.get_str(keys::UA_PROF_URL, &d.ua_prof_url),
        http_params: bundle.get_str(keys::HTTP_PARAMS, &d.http_params),
        email_gateway_number: bundle.get_str(keys::EMAIL_GATEWAY_NUMBER, &d.email_gateway_number),
        nai_suffix: bundle.get_str(keys::NAI_SUFFIX, &d.nai_suffix),
    }
}
