//! rasword単語帳サービスへの書き出し
//!
//! 単語の存在確認、生成、登録の3段階のHTTPリクエストで単語を登録します。
//! 存在確認の失敗は致命的ではなく、そのまま生成に進みます。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::RaswordError;
use crate::vocabulary::{ExportAck, VocabularyExporter, VocabularyWord};

/// 既定の接続先
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

const CHECK_TIMEOUT: Duration = Duration::from_secs(15);
const GENERATE_TIMEOUT: Duration = Duration::from_secs(90);
const ADD_TIMEOUT: Duration = Duration::from_secs(30);

const API_PROVIDER: &str = "gemini";
const SOURCE: &str = "lyrics";

#[derive(Serialize)]
struct CheckRequest<'a> {
    japanese_word: &'a str,
}

#[derive(Deserialize, Default)]
struct CheckResponse {
    #[serde(default)]
    exists: bool,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    japanese_word: &'a str,
    api_provider: &'a str,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GeneratedWord {
    part_of_speech: String,
    sentence1: String,
    sentence2: String,
    chinese_meaning: String,
    chinese_short: String,
    jlpt_level: String,
    kana_form: String,
    kanji_form: String,
    common_form: Option<String>,
    error: Option<String>,
}

#[derive(Serialize)]
struct AddWordRequest<'a> {
    japanese_word: &'a str,
    part_of_speech: &'a str,
    sentence1: &'a str,
    sentence2: &'a str,
    chinese_meaning: &'a str,
    chinese_short: &'a str,
    jlpt_level: &'a str,
    kana_form: &'a str,
    kanji_form: &'a str,
    common_form: &'a str,
    source: &'a str,
}

impl<'a> AddWordRequest<'a> {
    /// `surface`は前後の空白を取り除いた表層形です。
    fn new(surface: &'a str, word: &'a VocabularyWord, generated: &'a GeneratedWord) -> Self {
        let kana_form = if generated.kana_form.is_empty() {
            word.reading.as_deref().unwrap_or_default()
        } else {
            &generated.kana_form
        };
        Self {
            japanese_word: surface,
            part_of_speech: &generated.part_of_speech,
            sentence1: &generated.sentence1,
            sentence2: &generated.sentence2,
            chinese_meaning: &generated.chinese_meaning,
            chinese_short: &generated.chinese_short,
            jlpt_level: &generated.jlpt_level,
            kana_form,
            kanji_form: &generated.kanji_form,
            common_form: generated.common_form.as_deref().unwrap_or("kanji"),
            source: SOURCE,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct AddWordResponse {
    success: bool,
    error: Option<String>,
}

/// rasword単語帳サービスのクライアント
pub struct RaswordClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl RaswordClient {
    /// 新しいクライアントを作成します。
    ///
    /// # 引数
    ///
    /// * `base_url` - サービスのURL。末尾の`/`は取り除かれます
    pub fn new<S>(base_url: S) -> Self
    where
        S: AsRef<str>,
    {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// 接続先のURLを返します。
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn check(&self, surface: &str) -> Result<bool, RaswordError> {
        let resp = self
            .client
            .post(self.endpoint("/api/words/check"))
            .json(&CheckRequest {
                japanese_word: surface,
            })
            .timeout(CHECK_TIMEOUT)
            .send()?;
        if !resp.status().is_success() {
            return Ok(false);
        }
        Ok(resp.json::<CheckResponse>()?.exists)
    }

    fn generate(&self, surface: &str) -> Result<GeneratedWord, RaswordError> {
        let resp = self
            .client
            .post(self.endpoint("/api/generate"))
            .json(&GenerateRequest {
                japanese_word: surface,
                api_provider: API_PROVIDER,
            })
            .timeout(GENERATE_TIMEOUT)
            .send()?;
        let status = resp.status();
        let generated = resp.json::<GeneratedWord>().unwrap_or_default();
        if let Some(msg) = generated.error.clone() {
            return Err(RaswordError::rejected("/api/generate", msg));
        }
        if !status.is_success() {
            return Err(RaswordError::rejected(
                "/api/generate",
                format!("HTTP {status}"),
            ));
        }
        Ok(generated)
    }

    fn add(
        &self,
        surface: &str,
        word: &VocabularyWord,
        generated: &GeneratedWord,
    ) -> Result<(), RaswordError> {
        let resp = self
            .client
            .post(self.endpoint("/api/words"))
            .json(&AddWordRequest::new(surface, word, generated))
            .timeout(ADD_TIMEOUT)
            .send()?;
        let status = resp.status();
        let added = resp.json::<AddWordResponse>().unwrap_or_default();
        if !status.is_success() || !added.success {
            let msg = added.error.unwrap_or_else(|| format!("HTTP {status}"));
            return Err(RaswordError::rejected("/api/words", msg));
        }
        Ok(())
    }
}

impl Default for RaswordClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl VocabularyExporter for RaswordClient {
    type Error = RaswordError;

    fn export(&self, word: &VocabularyWord) -> Result<ExportAck, Self::Error> {
        let surface = word.surface.trim();
        if surface.is_empty() {
            return Err(RaswordError::rejected("export", "missing word"));
        }

        match self.check(surface) {
            Ok(true) => return Ok(ExportAck::AlreadyExists),
            Ok(false) => {}
            Err(e) => log::warn!("rasword /api/words/check failed: {e}"),
        }

        let generated = self.generate(surface)?;
        self.add(surface, word, &generated)?;
        log::debug!("exported {surface:?} to rasword");
        Ok(ExportAck::Created)
    }
}
