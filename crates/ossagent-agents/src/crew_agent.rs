use ossagent_models::Message;

/// One role in a crew
#[derive(Debug, Clone)]
pub struct CrewAgent {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub tools: Vec<String>,
    history: Vec<Message>,
}

impl CrewAgent {
    pub fn new(role: impl Into<String>, goal: impl Into<String>, backstory: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            tools: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools = tools.into_iter().map(Into::into).collect();
        self
    }

    pub fn system_prompt(&self) -> String {
        let tools_desc = if self.tools.is_empty() {
            "No tools available".to_string()
        } else {
            format!("Available tools: {}", self.tools.join(", "))
        };

        format!(
            "You are a {role}.\n\n\
             Goal: {goal}\n\n\
             Backstory: {backstory}\n\n\
             {tools_desc}\n\n\
             When using tools, respond with JSON in this format:\n\
             {{\"action\": \"use_tool\", \"tool\": \"tool_name\", \"parameters\": {{\"param\": \"value\"}}}}\n\n\
             Otherwise, respond normally to help achieve your goal.",
            role = self.role,
            goal = self.goal,
            backstory = self.backstory,
            tools_desc = tools_desc,
        )
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// The last `window` messages of this agent's history
    pub fn recent_history(&self, window: usize) -> &[Message] {
        let start = self.history.len().saturating_sub(window);
        &self.history[start..]
    }

    pub(crate) fn record(&mut self, task_prompt: String, response: String) {
        self.history.push(Message::user(task_prompt));
        self.history.push(Message::assistant(response));
    }
}
