use super::filter::Columns;
use super::params::Params;
use super::statement::Statement;
use config::TableNameConfig;
use type_mapping::BindValue;

/// Alias callers use for the member table in column lists
const MEMBER_ALIAS: &str = "members.";

/// Column names the session lookup joins and filters on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionColumns {
    pub member_key: String,
    pub token: String,
    pub created_time: String,
    pub device: String,
    pub ip: String,
}

impl Default for SessionColumns {
    fn default() -> Self {
        Self {
            member_key: "m_name".to_string(),
            token: "token".to_string(),
            created_time: "created_time".to_string(),
            device: "m_device".to_string(),
            ip: "m_ip".to_string(),
        }
    }
}

/// Find the member owning a live session matching token, device and ip
#[derive(Debug, Clone, PartialEq)]
pub struct SessionLookup {
    pub token: String,
    pub max_age_seconds: u64,
    pub device: String,
    pub ip: String,
    pub columns: Columns,
    pub schema: SessionColumns,
}

impl SessionLookup {
    pub fn new(
        token: impl Into<String>,
        max_age_seconds: u64,
        device: impl Into<String>,
        ip: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            max_age_seconds,
            device: device.into(),
            ip: ip.into(),
            columns: Columns::All,
            schema: SessionColumns::default(),
        }
    }

    pub fn columns(mut self, columns: Columns) -> Self {
        self.columns = columns;
        self
    }

    pub fn schema(mut self, schema: SessionColumns) -> Self {
        self.schema = schema;
        self
    }

    /// Render the member column list against the physical member table
    fn select_list(&self, members: &str) -> String {
        let columns = match &self.columns {
            Columns::List(columns) if !self.columns.is_all() => columns,
            _ => return "*".to_string(),
        };

        let rewritten = columns
            .iter()
            .map(|column| match column.strip_prefix(MEMBER_ALIAS) {
                Some(rest) => format!("{}.{}", members, rest),
                None => column.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("sub_query.{}, {}", self.schema.created_time, rewritten)
    }

    pub fn build(&self, tables: &TableNameConfig) -> Statement {
        let s = &self.schema;
        let members = tables.members.as_str();
        let sessions = tables.sessions.as_str();

        let mut params = Params::new();
        let token = params.push(self.token.as_str());
        let max_age = params.push(BindValue::Double(self.max_age_seconds as f64));
        let device = params.push(self.device.as_str());
        let ip = params.push(self.ip.as_str());

        let sql = format!(
            "WITH sub_query AS (\
             SELECT {sessions}.{key}, {sessions}.{created} FROM {sessions} \
             WHERE {token_col} = {token} \
             AND {created} > NOW() - make_interval(secs => {max_age}) \
             AND {device_col} = {device} \
             AND {ip_col} = {ip}) \
             SELECT {select} FROM {members} JOIN sub_query ON {members}.{key} = sub_query.{key}",
            sessions = sessions,
            members = members,
            key = s.member_key,
            created = s.created_time,
            token_col = s.token,
            device_col = s.device,
            ip_col = s.ip,
            token = token,
            max_age = max_age,
            device = device,
            ip = ip,
            select = self.select_list(members),
        );

        Statement::query(sql, params)
    }
}
