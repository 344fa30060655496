use chrono::{DateTime, FixedOffset};

schema! {
    /// A standardized phone number.
    pub struct Phone {
        pub source: Option<String>,
        /// Mobile, landline, ...
        pub kind: Option<String> as "type",
        /// Full number in international format.
        pub phone: Option<String>,
        pub country_code: Option<String>,
        pub city_code: Option<String>,
        pub number: Option<String>,
        pub extension: Option<String>,
        pub provider: Option<String>,
        pub country: Option<String>,
        pub region: Option<String>,
        pub city: Option<String>,
        pub timezone: Option<String>,
        /// Whether the phone conflicts with an address sent alongside it.
        pub qc_conflict: i64,
        pub qc: i64,
    }
}

schema! {
    /// A passport series and number.
    pub struct Passport {
        pub source: Option<String>,
        pub series: Option<String>,
        pub number: Option<String>,
        pub qc: i64,
    }
}

schema! {
    /// A person's full name, split and declined.
    pub struct Name {
        pub source: Option<String>,
        pub result: Option<String>,
        pub result_genitive: Option<String>,
        pub result_dative: Option<String>,
        pub result_ablative: Option<String>,
        pub surname: Option<String>,
        pub name: Option<String>,
        pub patronymic: Option<String>,
        pub gender: Option<String>,
        pub qc: i64,
    }
}

schema! {
    /// An email address.
    pub struct Email {
        pub source: Option<String>,
        pub email: Option<String>,
        pub local: Option<String>,
        pub domain: Option<String>,
        /// Personal, corporate, role, disposable.
        pub kind: Option<String> as "type",
        pub qc: i64,
    }
}

schema! {
    /// A date of birth.
    pub struct Birthdate {
        pub source: Option<String>,
        pub birthdate: Option<DateTime<FixedOffset>>,
        pub qc: i64,
    }
}
