#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(i64),
    TaskUpdated(i64),
    TaskDeleted(i64),
    TaskToggled(i64, bool), // id, completed
    TaskDeletedSuccessfully,
    TaskNotFound,
    TaskNotFoundWithId(i64),
    TaskTitleRequired,
    TasksNotFound,
    TasksHeader(usize), // count

    // === REQUEST MESSAGES ===
    RequestBodyRequired,
    RequestBodyInvalid(String), // parser error
    ConflictingTaskFilters,
    InvalidStatusFilter(String),
    AccessRestricted,
    InternalServerError,

    // === SERVER MESSAGES ===
    ServerStarting(String),  // name and version
    ServerListening(String), // address
    ServerStopped,
    ShutdownSignalReceived,
    ShutdownSignalFailed(String), // error
    HealthCheckOk,
    StaticDirMissing(String), // path

    // === DATABASE MESSAGES ===
    SchemaReady(String), // path

    // === AUTHENTICATION MESSAGES ===
    AuthEnabled(String), // username
    AuthDisabled,
    AuthUsernameMissing,
    AuthPasswordMissing,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved(String), // path
    ConfigDeleted,
    ConfigNotFound,
    ConfigInvalidPort(String), // raw value
    ConfigInvalidFlag(String, String), // name, raw value

    // === PROMPTS ===
    PromptHost,
    PromptPort,
    PromptDatabasePath,
    PromptEnableAuth,
    PromptUsername,
}
