//! Prompt texts and research fallback notices.

use reelscript_core::ResearchOutcome;

/// Characters of a lookup failure message kept in the fallback notice.
const FAILED_DETAIL_CHARS: usize = 50;

/// Title prompt. Placeholder: `{subject}`.
pub const TITLE_PROMPT: &str = "请为'{subject}'主题的短视频创作1个吸引人的标题，严格遵循：
1. 用年轻人熟悉的网络热词/疑问句/反差感（例：'炸了！Sora居然能做电影级视频？'）
2. 20字以内，无专业术语，一眼抓注意力
3. 适配抖音/小红书等短视频平台传播逻辑";

/// Script prompt. Placeholders: `{title}`, `{duration}`, `{word_count}`,
/// `{research}`.
pub const SCRIPT_PROMPT: &str = "你是抖音/小红书风格的年轻向短视频博主，说话接地气、有网感，避免说教式表达。
请根据以下信息生成结构化视频脚本，严格遵守要求：

核心约束：
- 视频标题：{title}
- 目标时长：{duration}分钟（1分钟≈200字，总字数控制在 {word_count} 字左右）
- 参考资料：维基百科搜索结果（仅提取相关干货，无关内容直接忽略）

脚本结构要求（必须明确分隔）：
1. 【开头】（30字内）：用反转/疑问/热点引入，瞬间抓住注意力（例：\"你敢信？AI视频已经卷到这种程度了！\"）；
2. 【中间】（核心干货）：提炼维基百科关键信息（技术原理/核心功能/应用场景），用大白话解释，无专业术语；
3. 【结尾】（30字内）：留悬念/引导互动（例：\"下期实测Sora生成视频，评论区蹲链接的优先安排！\"）；

风格要求：
- 全程口语化，像和朋友聊天，适当用表情符号（如🤯、🔥、🚀）增强感染力；
- 避免长句，每句不超过15字，符合短视频快节奏表达；
- 网络热词自然融入（如\"卷疯了\"、\"YYDS\"、\"破防了\"），不堆砌。

参考资料：
```{research}```";

/// Used when the lookup found nothing or only blank text.
pub const NOT_FOUND_FALLBACK: &str = "维基百科未找到相关详细信息，以下基于公开常识生成内容";

/// Used when the encyclopedia could not be reached.
pub const NETWORK_FALLBACK: &str = "维基百科网络连接失败，以下基于公开常识生成内容";

/// Used when the lookup timed out.
pub const TIMEOUT_FALLBACK: &str = "维基百科搜索超时，以下基于公开常识生成内容";

/// Tail of the notice used for any other lookup failure.
pub const FAILED_FALLBACK_SUFFIX: &str = "...，以下基于公开常识生成内容";

/// Grounding text for the script prompt.
///
/// Usable summaries pass through untouched; every other outcome maps to its
/// fixed notice. For `Failed`, only the first 50 characters of the message
/// are kept.
///
/// # Examples
///
/// ```
/// use reelscript_core::ResearchOutcome;
/// use reelscript_narrative::{TIMEOUT_FALLBACK, research_text};
///
/// assert_eq!(research_text(&ResearchOutcome::Timeout), TIMEOUT_FALLBACK);
/// assert_eq!(
///     research_text(&ResearchOutcome::Failed("HTTP 503".into())),
///     "维基百科搜索异常：HTTP 503...，以下基于公开常识生成内容"
/// );
/// ```
pub fn research_text(outcome: &ResearchOutcome) -> String {
    if let Some(text) = outcome.usable_text() {
        return text.to_string();
    }
    match outcome {
        ResearchOutcome::Found(_) | ResearchOutcome::NotFound => NOT_FOUND_FALLBACK.to_string(),
        ResearchOutcome::NetworkFailure(_) => NETWORK_FALLBACK.to_string(),
        ResearchOutcome::Timeout => TIMEOUT_FALLBACK.to_string(),
        ResearchOutcome::Failed(message) => {
            let detail: String = message.chars().take(FAILED_DETAIL_CHARS).collect();
            format!("维基百科搜索异常：{}{}", detail, FAILED_FALLBACK_SUFFIX)
        }
    }
}
