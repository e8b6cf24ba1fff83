//! Notification texts sent during a call's lifecycle

/// Someone picked up
pub fn answered(display_name: &str) -> String {
    format!("\n📞 {} が電話に出ました！", display_name)
}

/// Recording analysis is about to start
pub fn analysis_started() -> String {
    "\n🎤 通話録音の解析を開始します...".to_string()
}

/// Finished summary
pub fn summary(text: &str) -> String {
    format!("\n📝 通話要約結果:\n{}", text)
}

/// Analysis failed
pub fn analysis_failed(error: &str) -> String {
    format!("\n❌ AI処理中にエラーが発生しました:\n{}", error)
}
