/// What the sports widget gets: recent results for followed teams, plus
/// results for followed players resolved through their current team.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SportsSummary {
    pub teams: Vec<SportsEvent>,
    pub players: Vec<PlayerEvents>,
}

/// One finished event, field names as TheSportsDB serves them. Scores come
/// back as strings upstream and stay strings here.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SportsEvent {
    #[serde(rename = "idEvent")]
    pub id: String,
    #[serde(default, rename = "strEvent")]
    pub name: Option<String>,
    #[serde(default, rename = "strLeague")]
    pub league: Option<String>,
    #[serde(default, rename = "strHomeTeam")]
    pub home_team: Option<String>,
    #[serde(default, rename = "strAwayTeam")]
    pub away_team: Option<String>,
    #[serde(default, rename = "intHomeScore")]
    pub home_score: Option<String>,
    #[serde(default, rename = "intAwayScore")]
    pub away_score: Option<String>,
    #[serde(default, rename = "dateEvent")]
    pub date: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PlayerEvents {
    #[serde(rename = "playerName")]
    pub player_name: String,
    #[serde(default, rename = "teamName")]
    pub team_name: Option<String>,
    pub events: Vec<SportsEvent>,
}

/// A team search hit, for the "follow a team" flow.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Team {
    #[serde(rename = "idTeam")]
    pub id: String,
    #[serde(default, rename = "strTeam")]
    pub name: Option<String>,
    #[serde(default, rename = "strLeague")]
    pub league: Option<String>,
    #[serde(default, rename = "strBadge")]
    pub badge: Option<String>,
    #[serde(default, rename = "strStadium")]
    pub stadium: Option<String>,
}
