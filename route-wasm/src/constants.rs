/// Endpoints of the route store.
pub const API_ROUTES: &str = "/api/highways";

/// Element ids of the board page.
pub const ID_BOARD: &str = "board";
pub const ID_ROUTE_SELECT: &str = "highway-select";
pub const ID_SELECT_BUTTON: &str = "select-highway";
pub const ID_RESET: &str = "reset";
pub const ID_GIVE_UP: &str = "giveup";
pub const ID_INFO: &str = "highway-info";
pub const ID_STATUS: &str = "status";
pub const ID_ROUTE_FILE: &str = "file";

/// Element ids of the editor page.
pub const ID_NODE_TABLE: &str = "node-table";
pub const ID_ADD_ROW: &str = "add-row";
pub const ID_REORDER: &str = "reorder";
pub const ID_SAVE: &str = "save";
pub const ID_RESULT: &str = "result";
pub const ID_JSON_OUTPUT: &str = "json-output";
pub const ID_SAVE_STATUS: &str = "save-status";
pub const ID_META_ID: &str = "hw-id";
pub const ID_META_NAME: &str = "hw-name";
pub const ID_META_ORIGIN: &str = "hw-origin";
pub const ID_META_DESTINATION: &str = "hw-destination";

pub const MSG_SAVED: &str = "保存しました。ゲーム用アプリで即時参照できます。";
pub const MSG_SAVE_FAILED: &str = "保存に失敗しました";
pub const MSG_BAD_POINTS: &str = "地点を正しく入力してください";
