//! # 値オブジェクト
//!
//! 質問と作成者の表示に使う、長さ制約付きの文字列型。
//! どちらも生成時に前後の空白を除去し、空文字列を拒否する。

define_validated_string! {
    /// ユーザー表示名
    ///
    /// 1〜50 文字。個人情報のため `Debug` ではマスクされる。
    pub struct UserName {
        label: "ユーザー名",
        max_length: 50,
        pii: true,
    }
}

define_validated_string! {
    /// 質問タイトル（1〜100 文字）
    pub struct QuestionTitle {
        label: "質問タイトル",
        max_length: 100,
    }
}
