//! Static descriptors of every API operation.
//!
//! A descriptor names the endpoint, the verb, the API family (which decides
//! headers and status handling) and the envelope rule applied to the decoded
//! body. URLs are composed by plain concatenation:
//! `<base>/<version>/<path><suffix>`.

use http::Method;

/// Version segment of the cleaning API.
pub const CLEAN_VERSION: &str = "v2";

/// Version segment of the suggestion API.
pub const SUGGEST_VERSION: &str = "4_1";

/// Version segment of the geolocation API.
pub const GEOLOCATION_VERSION: &str = "4_1";

/// Which API an operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Token and secret; non-2xx statuses become [`Error::HttpError`](crate::Error::HttpError).
    Clean,
    /// Token only; statuses map to the protocol errors before decoding.
    Suggest,
    /// Token only, like [`Family::Suggest`], but GET without a body.
    Geolocation,
}

/// How a decoded body is normalized before it is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// Reject empty bodies, then unwrap a lone key or a lone array element.
    Single,
    /// Unwrap the `suggestions` array.
    Suggestions,
    /// Return the decoded value untouched.
    Raw,
}

/// A single API operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Short name used in logs.
    pub name: &'static str,
    /// HTTP method.
    pub method: Method,
    /// API family.
    pub family: Family,
    /// Path below the version segment.
    pub path: &'static str,
    /// Envelope rule for the decoded body.
    pub envelope: Envelope,
}

impl Operation {
    /// Version segment for this operation's family.
    pub fn version(&self) -> &'static str {
        match self.family {
            Family::Clean => CLEAN_VERSION,
            Family::Suggest => SUGGEST_VERSION,
            Family::Geolocation => GEOLOCATION_VERSION,
        }
    }

    /// Joins `base`, the version, the path and `suffix`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dadata::catalog::CLEAN_PHONE;
    ///
    /// assert_eq!(
    ///     CLEAN_PHONE.url("https://dadata.ru/api", ""),
    ///     "https://dadata.ru/api/v2/clean/phone"
    /// );
    /// ```
    pub fn url(&self, base: &str, suffix: &str) -> String {
        format!(
            "{}/{}/{}{}",
            base.trim_end_matches('/'),
            self.version(),
            self.path,
            suffix
        )
    }
}

const fn clean(name: &'static str, path: &'static str) -> Operation {
    Operation {
        name,
        method: Method::POST,
        family: Family::Clean,
        path,
        envelope: Envelope::Single,
    }
}

pub static CLEAN_ADDRESS: Operation = clean("clean-address", "clean/address");
pub static CLEAN_PHONE: Operation = clean("clean-phone", "clean/phone");
pub static CLEAN_PASSPORT: Operation = clean("clean-passport", "clean/passport");
pub static CLEAN_NAME: Operation = clean("clean-name", "clean/name");
pub static CLEAN_EMAIL: Operation = clean("clean-email", "clean/email");
pub static CLEAN_BIRTHDATE: Operation = clean("clean-birthdate", "clean/birthdate");
pub static CLEAN_VEHICLE: Operation = clean("clean-vehicle", "clean/vehicle");

/// Account balance. The unwrapped body is a bare number.
pub static GET_BALANCE: Operation = Operation {
    name: "get-balance",
    method: Method::GET,
    family: Family::Clean,
    path: "profile/balance",
    envelope: Envelope::Single,
};

/// Usage for one day, `?date=YYYY-MM-DD` optional.
pub static GET_DAILY_STATISTICS: Operation = Operation {
    name: "get-daily-statistics",
    method: Method::GET,
    family: Family::Clean,
    path: "stat/daily",
    envelope: Envelope::Single,
};

/// Address of an IP, `?ip=` required. The body is `{"location": {"data": {..}}}`.
pub static DETECT_ADDRESS_BY_IP: Operation = Operation {
    name: "detect-address-by-ip",
    method: Method::GET,
    family: Family::Geolocation,
    path: "rs/detectAddressByIp",
    envelope: Envelope::Raw,
};

/// Suggestions; the suggestion type is appended to the path.
pub static SUGGEST: Operation = Operation {
    name: "suggest",
    method: Method::POST,
    family: Family::Suggest,
    path: "rs/suggest/",
    envelope: Envelope::Suggestions,
};

/// Suggestions against a caller-supplied base URL. The path is unused.
pub static SUGGEST_BY_URL: Operation = Operation {
    name: "suggest-by-custom-url",
    method: Method::POST,
    family: Family::Suggest,
    path: "",
    envelope: Envelope::Suggestions,
};

/// Organization by INN, OGRN or HID.
pub static FIND_PARTY_BY_ID: Operation = Operation {
    name: "find-party-by-id",
    method: Method::POST,
    family: Family::Suggest,
    path: "rs/findById/party",
    envelope: Envelope::Suggestions,
};

/// Delivery service city ids by KLADR code.
pub static FIND_DELIVERY_BY_ID: Operation = Operation {
    name: "find-delivery-by-id",
    method: Method::POST,
    family: Family::Suggest,
    path: "rs/findById/delivery",
    envelope: Envelope::Suggestions,
};

/// Values the cleaning API can standardize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CleanTarget {
    /// Postal addresses, `clean/address`.
    Address,
    /// Phone numbers, `clean/phone`.
    Phone,
    /// Passport series and numbers, `clean/passport`.
    Passport,
    /// Full names, `clean/name`.
    Name,
    /// Email addresses, `clean/email`.
    Email,
    /// Dates of birth, `clean/birthdate`.
    Birthdate,
    /// Vehicle makes and models, `clean/vehicle`.
    Vehicle,
}

impl CleanTarget {
    /// The descriptor of this target's endpoint.
    pub fn operation(self) -> &'static Operation {
        match self {
            CleanTarget::Address => &CLEAN_ADDRESS,
            CleanTarget::Phone => &CLEAN_PHONE,
            CleanTarget::Passport => &CLEAN_PASSPORT,
            CleanTarget::Name => &CLEAN_NAME,
            CleanTarget::Email => &CLEAN_EMAIL,
            CleanTarget::Birthdate => &CLEAN_BIRTHDATE,
            CleanTarget::Vehicle => &CLEAN_VEHICLE,
        }
    }
}

/// Directories the suggestion API can search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SuggestionType {
    /// Organizations and sole proprietors.
    Party,
    Address,
    Bank,
    /// Full names.
    Fio,
    Email,
    /// Passport issuing units.
    FmsUnit,
    /// Tax offices.
    FnsUnit,
    PostalOffice,
    /// Magistrate courts.
    RegionCourt,
    Country,
    Currency,
    /// Activity classifier, OKVED 2.
    Okved2,
    /// Product classifier, OKPD 2.
    Okpd2,
    /// Any other directory name.
    Custom(String),
}

impl SuggestionType {
    /// Alias of [`SuggestionType::Party`].
    pub const ORGANIZATION: SuggestionType = SuggestionType::Party;

    /// The path segment for this type.
    pub fn as_str(&self) -> &str {
        match self {
            SuggestionType::Party => "party",
            SuggestionType::Address => "address",
            SuggestionType::Bank => "bank",
            SuggestionType::Fio => "fio",
            SuggestionType::Email => "email",
            SuggestionType::FmsUnit => "fms_unit",
            SuggestionType::FnsUnit => "fns_unit",
            SuggestionType::PostalOffice => "postal_office",
            SuggestionType::RegionCourt => "region_court",
            SuggestionType::Country => "country",
            SuggestionType::Currency => "currency",
            SuggestionType::Okved2 => "okved2",
            SuggestionType::Okpd2 => "okpd2",
            SuggestionType::Custom(name) => name,
        }
    }
}

impl std::fmt::Display for SuggestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
