use serde_json::Value;

schema! {
    /// A standardized postal address.
    ///
    /// Returned by address cleaning and by IP geolocation. Identifiers follow
    /// the FIAS and KLADR registries.
    pub struct Address {
        /// Address as it was sent.
        pub source: Option<String>,
        /// Standardized address on one line.
        pub result: Option<String>,
        pub postal_code: Option<String>,
        pub country: Option<String>,
        pub country_iso_code: Option<String>,
        pub federal_district: Option<String>,

        pub region_fias_id: Option<String>,
        pub region_kladr_id: Option<String>,
        pub region_iso_code: Option<String>,
        pub region_with_type: Option<String>,
        pub region_type: Option<String>,
        pub region_type_full: Option<String>,
        pub region: Option<String>,

        pub area_fias_id: Option<String>,
        pub area_kladr_id: Option<String>,
        pub area_with_type: Option<String>,
        pub area_type: Option<String>,
        pub area_type_full: Option<String>,
        pub area: Option<String>,

        pub city_fias_id: Option<String>,
        pub city_kladr_id: Option<String>,
        pub city_with_type: Option<String>,
        pub city_type: Option<String>,
        pub city_type_full: Option<String>,
        pub city: Option<String>,
        pub city_area: Option<String>,

        pub city_district_fias_id: Option<String>,
        pub city_district_kladr_id: Option<String>,
        pub city_district_with_type: Option<String>,
        pub city_district_type: Option<String>,
        pub city_district_type_full: Option<String>,
        pub city_district: Option<String>,

        pub settlement_fias_id: Option<String>,
        pub settlement_kladr_id: Option<String>,
        pub settlement_with_type: Option<String>,
        pub settlement_type: Option<String>,
        pub settlement_type_full: Option<String>,
        pub settlement: Option<String>,

        pub street_fias_id: Option<String>,
        pub street_kladr_id: Option<String>,
        pub street_with_type: Option<String>,
        pub street_type: Option<String>,
        pub street_type_full: Option<String>,
        pub street: Option<String>,

        pub house_fias_id: Option<String>,
        pub house_kladr_id: Option<String>,
        pub house_type: Option<String>,
        pub house_type_full: Option<String>,
        pub house: Option<String>,
        pub block_type: Option<String>,
        pub block_type_full: Option<String>,
        pub block: Option<String>,

        pub flat_type: Option<String>,
        pub flat_type_full: Option<String>,
        pub flat: Option<String>,
        /// Flat area in square meters.
        pub flat_area: f64,
        pub square_meter_price: f64,
        pub flat_price: f64,
        pub postal_box: Option<String>,

        pub fias_id: Option<String>,
        pub fias_code: Option<String>,
        /// Level of detail the address was recognized to.
        pub fias_level: i64,
        pub fias_actuality_state: i64,
        pub kladr_id: Option<String>,
        /// Whether the settlement is an administrative center.
        pub capital_marker: i64,
        pub okato: Option<String>,
        pub oktmo: Option<String>,
        pub tax_office: Option<String>,
        pub tax_office_legal: Option<String>,
        pub timezone: Option<String>,

        pub geo_lat: f64,
        pub geo_lon: f64,
        pub beltway_hit: Option<String>,
        pub beltway_distance: Option<String>,
        /// Nearest metro stations, as sent by the API.
        pub metro: Value,

        /// Precision of the coordinates.
        pub qc_geo: i64,
        /// Whether the address is complete enough for delivery.
        pub qc_complete: i64,
        /// Whether the house was found in the registry.
        pub qc_house: i64,
        pub qc: i64,
        /// Parts of the input that were not recognized.
        pub unparsed_parts: Option<String>,
    }
}
