//! 作答状态
//!
//! 题目ID → 已选选项ID 的映射。只在离开一道题时写入，提交成功前从不清空。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::question::{AnswerId, QuestionId};

/// 作答状态
///
/// 序列化为 `{"1":[5],"2":[9]}`，键按题目ID升序排列
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerState {
    selections: BTreeMap<QuestionId, Vec<AnswerId>>,
}

impl AnswerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一道题的选择，整体覆盖之前的选择（不合并）
    ///
    /// 保留传入顺序，去除重复的选项ID
    pub fn record(&mut self, question_id: QuestionId, selected: impl IntoIterator<Item = AnswerId>) {
        let mut ids: Vec<AnswerId> = Vec::new();
        for id in selected {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        self.selections.insert(question_id, ids);
    }

    /// 获取某道题已保存的选择
    pub fn get(&self, question_id: QuestionId) -> Option<&[AnswerId]> {
        self.selections.get(&question_id).map(Vec::as_slice)
    }

    /// 该题是否被访问并保存过
    pub fn contains(&self, question_id: QuestionId) -> bool {
        self.selections.contains_key(&question_id)
    }

    /// 已保存的题目数量
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// 至少选了一个选项的题目数量
    pub fn answered_count(&self) -> usize {
        self.selections.values().filter(|ids| !ids.is_empty()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &[AnswerId])> {
        self.selections.iter().map(|(q, ids)| (*q, ids.as_slice()))
    }

    /// 提交请求体
    pub fn to_json_body(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_overwrites_previous_selection() {
        let mut state = AnswerState::new();
        state.record(1, [5, 6]);
        state.record(1, [7]);
        assert_eq!(state.get(1), Some(&[7][..]));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_record_empty_selection_keeps_key() {
        let mut state = AnswerState::new();
        state.record(2, Vec::new());
        assert!(state.contains(2));
        assert_eq!(state.answered_count(), 0);
        assert_eq!(state.to_json_body().unwrap(), r#"{"2":[]}"#);
    }

    #[test]
    fn test_record_dedups_in_order() {
        let mut state = AnswerState::new();
        state.record(1, [9, 5, 9]);
        assert_eq!(state.get(1), Some(&[9, 5][..]));
    }

    #[test]
    fn test_json_body_keys_are_numeric_order() {
        let mut state = AnswerState::new();
        state.record(10, [3]);
        state.record(2, [9]);
        state.record(1, [5]);
        assert_eq!(state.to_json_body().unwrap(), r#"{"1":[5],"2":[9],"10":[3]}"#);
    }

    #[test]
    fn test_deserialize_from_string_keys() {
        let state: AnswerState = serde_json::from_str(r#"{"4":[1,2]}"#).unwrap();
        assert_eq!(state.get(4), Some(&[1, 2][..]));
    }
}
