//! Raw carrier config bundles.
//!
//! The carrier config provider hands back a loose key/value bundle per
//! subscription. It mixes MMS settings with unrelated carrier settings, and
//! nothing guarantees a key is present or carries the expected type. The
//! typed accessors here fall back to a caller-supplied default on both a
//! missing key and a type mismatch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Provider key names for the MMS portion of a carrier bundle.
pub mod keys {
    pub const APPEND_TRANSACTION_ID: &str = "enabledTransID";
    pub const MMS_ENABLED: &str = "enabledMMS";
    pub const GROUP_MMS_ENABLED: &str = "enableGroupMms";
    pub const NOTIFY_WAP_MMSC_ENABLED: &str = "enabledNotifyWapMMSC";
    pub const ALIAS_ENABLED: &str = "aliasEnabled";
    pub const ALLOW_ATTACH_AUDIO: &str = "allowAttachAudio";
    pub const MULTIPART_SMS_ENABLED: &str = "enableMultipartSMS";
    pub const SMS_DELIVERY_REPORT_ENABLED: &str = "enableSMSDeliveryReports";
    pub const SUPPORT_MMS_CONTENT_DISPOSITION: &str = "supportMmsContentDisposition";
    pub const SEND_MULTIPART_SMS_AS_SEPARATE_MESSAGES: &str = "sendMultipartSmsAsSeparateMessages";
    pub const MMS_READ_REPORT_ENABLED: &str = "enableMMSReadReports";
    pub const MMS_DELIVERY_REPORT_ENABLED: &str = "enableMMSDeliveryReports";
    pub const CLOSE_CONNECTION: &str = "mmsCloseConnection";
    pub const SHOW_CELL_BROADCAST_APP_LINKS: &str = "config_cellBroadcastAppLinks";
    pub const SUPPORT_HTTP_CHARSET_HEADER: &str = "supportHttpCharsetHeader";
    pub const MAX_MESSAGE_SIZE: &str = "maxMessageSize";
    pub const MAX_IMAGE_WIDTH: &str = "maxImageWidth";
    pub const MAX_IMAGE_HEIGHT: &str = "maxImageHeight";
    pub const RECIPIENT_LIMIT: &str = "recipientLimit";
    pub const ALIAS_MIN_CHARS: &str = "aliasMinChars";
    pub const ALIAS_MAX_CHARS: &str = "aliasMaxChars";
    pub const SMS_TO_MMS_TEXT_THRESHOLD: &str = "smsToMmsTextThreshold";
    pub const SMS_TO_MMS_TEXT_LENGTH_THRESHOLD: &str = "smsToMmsTextLengthThreshold";
    pub const MESSAGE_TEXT_MAX_SIZE: &str = "maxMessageTextSize";
    pub const SUBJECT_MAX_LENGTH: &str = "maxSubjectLength";
    pub const HTTP_SOCKET_TIMEOUT: &str = "httpSocketTimeout";
    pub const UA_PROF_TAG_NAME: &str = "uaProfTagName";
    pub const USER_AGENT: &str = "userAgent";
    pub const UA_PROF_URL: &str = "uaProfUrl";
    pub const HTTP_PARAMS: &str = "httpParams";
    pub const EMAIL_GATEWAY_NUMBER: &str = "emailGatewayNumber";
    pub const NAI_SUFFIX: &str = "naiSuffix";
}

/// A single value in a carrier bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BundleValue {
    Bool(bool),
    Int(i32),
    Str(String),
}

/// Raw key/value bundle as returned by the carrier config provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarrierBundle {
    entries: HashMap<String, BundleValue>,
}

impl CarrierBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in the bundle.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bundle carries no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a boolean value.
    pub fn put_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.entries.insert(key.to_string(), BundleValue::Bool(value));
        self
    }

    /// Insert an integer value.
    pub fn put_int(&mut self, key: &str, value: i32) -> &mut Self {
        self.entries.insert(key.to_string(), BundleValue::Int(value));
        self
    }

    /// Insert a string value.
    pub fn put_str(&mut self, key: &str, value: &str) -> &mut Self {
        self.entries
            .insert(key.to_string(), BundleValue::Str(value.to_string()));
        self
    }

    /// Boolean value for `key`, or `default` when missing or mistyped.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.entries.get(key) {
            Some(BundleValue::Bool(v)) => *v,
            _ => default,
        }
    }

    /// Integer value for `key`, or `default` when missing or mistyped.
    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        match self.entries.get(key) {
            Some(BundleValue::Int(v)) => *v,
            _ => default,
        }
    }

    /// String value for `key`, or `default` when missing or mistyped.
    pub fn get_str(&self, key: &str, default: &str) -> String {
        match self.entries.get(key) {
            Some(BundleValue::Str(v)) => v.clone(),
            _ => default.to_string(),
        }
    }
}
