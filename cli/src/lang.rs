//! Message lookup keyed by the current locale, with `{{name}}` placeholders.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Zh,
}

impl Lang {
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("zh") {
            Lang::Zh
        } else {
            Lang::En
        }
    }

    /// `FFC_LANG`, then `LANG`, then English.
    pub fn current() -> Self {
        std::env::var("FFC_LANG")
            .or_else(|_| std::env::var("LANG"))
            .map(|tag| Lang::from_tag(&tag))
            .unwrap_or(Lang::En)
    }
}

fn zh(key: &str) -> Option<&'static str> {
    Some(match key {
        "File Forgetting Curve" => "文件遗忘曲线",
        "File Expired" => "文件已过期",
        "Run [ffc list] to check" => "运行 [ffc list] 查看",
        "Expired" => "已过期",
        "Waiting for a reminder" => "等待提醒",
        "Empty" => "空",
        "Recommend" => "推荐",
        "Label name cannot be empty" => "标签名不能为空",
        "Already exists label: {{label}}" => "已存在标签：{{label}}",
        "Unknown label: {{label}}" => "未知标签：{{label}}",
        "Unknown level: {{level}}" => "未知提醒等级：{{level}}",
        "Invalid schedule: {{reason}}" => "提醒表无效：{{reason}}",
        "Created label {{label}}" => "已创建标签 {{label}}",
        "Removed label {{label}}" => "已删除标签 {{label}}",
        "No labels" => "没有标签",
        "No reminder for {{file}}" => "{{file}} 没有提醒",
        "File not found: {{file}}" => "文件不存在：{{file}}",
        "Remind {{file}} at {{date}}" => "将在 {{date}} 提醒 {{file}}",
        "Removed reminder for {{file}}" => "已删除 {{file}} 的提醒",
        "Migrated {{count}} reminders" => "已迁移 {{count}} 条提醒",
        "day" => "天",
        "days" => "天",
        "hour" => "小时",
        "hours" => "小时",
        "minute" => "分钟",
        "minutes" => "分钟",
        "less than a minute" => "不到一分钟",
        "20 minutes" => "20 分钟",
        "1 hours" => "1 小时",
        "8 hours" => "8 小时",
        "1 days" => "1 天",
        "2 days" => "2 天",
        "7 days" => "7 天",
        "30 days" => "30 天",
        "Impossible Forget" => "不可能忘记",
        "Maybe Forget" => "可能忘记",
        "Very Easy" => "非常简单",
        "Easy" => "简单",
        "Normal" => "一般",
        "Hard" => "困难",
        "Very Hard" => "非常困难",
        "Forgotten Some" => "忘记一些",
        "Forgotten" => "已忘记",
        _ => return None,
    })
}

/// English text is the key itself.
pub fn lookup(lang: Lang, key: &str) -> String {
    match lang {
        Lang::Zh => zh(key).unwrap_or(key).to_string(),
        Lang::En => key.to_string(),
    }
}

pub fn get_in(lang: Lang, key: &str, args: &[(&str, &str)]) -> String {
    let mut out = lookup(lang, key);
    for (name, value) in args {
        out = out.replace(&format!("{{{{{name}}}}}"), value);
    }
    out
}

pub fn get(key: &str, args: &[(&str, &str)]) -> String {
    get_in(Lang::current(), key, args)
}
