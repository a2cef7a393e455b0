/// The reshaped forecast the weather widget consumes: today's conditions
/// plus the next three days. Temperatures are whole degrees Celsius, wind is
/// km/h, `chance_of_rain` and `humidity` are percentages.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CurrentConditions {
    pub temp: i32,
    pub description: String,
    #[serde(rename = "iconURL")]
    pub icon_url: String,
    pub high: i32,
    pub low: i32,
    pub wind: i32,
    pub humidity: i32,
    #[serde(rename = "chanceOfRain")]
    pub chance_of_rain: i32,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ForecastDay {
    /// Weekday name, e.g. "Tuesday".
    pub day: String,
    pub high: i32,
    pub low: i32,
    #[serde(rename = "iconURL")]
    pub icon_url: String,
}
