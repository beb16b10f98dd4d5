//! ラティス（格子）構造の実装モジュール。
//!
//! 各文字位置について、そこで終わる最良のノード（直前の境界と累積コスト）だけを保持します。
//! 位置を左から順に処理することで、最小コスト経路を動的計画法で求めます。

/// 未知語ノードの単語ID
pub const UNKNOWN_WORD_ID: u32 = u32::MAX;

/// ラティス内のノード。
///
/// 各ノードは、ある位置で終わる最良の単語候補を表します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// 単語の開始位置（文字単位）。
    pub start_word: usize,
    /// 単語ID。未知語の場合は[`UNKNOWN_WORD_ID`]。
    pub word_id: u32,
    /// 単語コスト。
    pub word_cost: u64,
    /// 文頭からこのノードまでの最小コスト。
    pub min_cost: u64,
}

impl Node {
    /// 未知語ノードかどうかを判定します。
    #[inline(always)]
    pub const fn is_unknown(&self) -> bool {
        self.word_id == UNKNOWN_WORD_ID
    }
}

/// 1-best解用のラティス構造体。
#[derive(Default)]
pub struct Lattice {
    ends: Vec<Option<Node>>,
    len_char: usize,
}

impl Lattice {
    /// ラティスをリセットし、新しい文の処理を準備します。
    ///
    /// # 引数
    ///
    /// * `len_char` - 新しい文の文字数
    pub fn reset(&mut self, len_char: usize) {
        self.ends.clear();
        self.ends.resize(len_char + 1, None);
        self.len_char = len_char;
    }

    /// 位置`i`に到達可能かどうかを返します。文頭は常に到達可能です。
    #[inline(always)]
    pub fn has_previous_node(&self, i: usize) -> bool {
        i == 0 || self.ends.get(i).is_some_and(|n| n.is_some())
    }

    /// 文頭から位置`i`までの最小コストを返します。
    #[inline(always)]
    fn min_cost_at(&self, i: usize) -> u64 {
        if i == 0 {
            0
        } else {
            self.ends[i].map_or(u64::MAX, |n| n.min_cost)
        }
    }

    /// ラティスに新しいエッジを挿入します。
    ///
    /// `end_word`の既存ノードよりコストが真に小さいか、コストが等しく開始位置がより前
    /// （つまりエッジがより長い）場合にのみ置き換えます。同じ長さで同じコストの
    /// エッジは先に挿入されたものが残ります。
    ///
    /// # 引数
    ///
    /// * `start_word` - 単語の開始位置
    /// * `end_word` - 単語の終了位置
    /// * `word_id` - 単語ID
    /// * `word_cost` - 単語コスト
    pub fn insert_node(&mut self, start_word: usize, end_word: usize, word_id: u32, word_cost: u64) {
        debug_assert!(start_word < end_word);
        debug_assert!(end_word <= self.len_char);
        debug_assert!(self.has_previous_node(start_word));

        let min_cost = self.min_cost_at(start_word).saturating_add(word_cost);
        let replace = match &self.ends[end_word] {
            None => true,
            Some(cur) => {
                min_cost < cur.min_cost || (min_cost == cur.min_cost && start_word < cur.start_word)
            }
        };
        if replace {
            self.ends[end_word] = Some(Node {
                start_word,
                word_id,
                word_cost,
                min_cost,
            });
        }
    }

    /// 最良パスのノードをベクトルに追加します。
    ///
    /// 文末から後方にたどるため、ノードは逆順（文末側が先頭）に格納されます。
    ///
    /// # 引数
    ///
    /// * `top_nodes` - `(終了位置, ノード)`を追加するベクトル
    pub fn append_top_nodes(&self, top_nodes: &mut Vec<(usize, Node)>) {
        let mut end_word = self.len_char;
        while end_word != 0 {
            let Some(node) = self.ends[end_word] else {
                debug_assert!(false, "the end of the sentence must be reachable");
                break;
            };
            top_nodes.push((end_word, node));
            end_word = node.start_word;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortest_path() {
        let mut lattice = Lattice::default();
        lattice.reset(3);
        lattice.insert_node(0, 2, 0, 5);
        lattice.insert_node(0, 1, 1, 3);
        assert!(lattice.has_previous_node(1));
        assert!(lattice.has_previous_node(2));
        assert!(!lattice.has_previous_node(3));
        lattice.insert_node(1, 2, 2, 1);
        lattice.insert_node(2, 3, 3, 1);

        let mut top_nodes = vec![];
        lattice.append_top_nodes(&mut top_nodes);
        let path: Vec<_> = top_nodes.iter().rev().map(|(e, n)| (n.start_word, *e)).collect();
        assert_eq!(path, vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(top_nodes[0].1.min_cost, 5);
    }

    #[test]
    fn test_tie_prefers_longer_edge() {
        let mut lattice = Lattice::default();
        lattice.reset(2);
        lattice.insert_node(0, 1, 0, 1);
        lattice.insert_node(1, 2, 1, 1);
        lattice.insert_node(0, 2, 2, 2);

        let mut top_nodes = vec![];
        lattice.append_top_nodes(&mut top_nodes);
        assert_eq!(top_nodes.len(), 1);
        assert_eq!(top_nodes[0].1.word_id, 2);
    }

    #[test]
    fn test_tie_keeps_first_inserted() {
        let mut lattice = Lattice::default();
        lattice.reset(1);
        lattice.insert_node(0, 1, 4, 1);
        lattice.insert_node(0, 1, 2, 1);

        let mut top_nodes = vec![];
        lattice.append_top_nodes(&mut top_nodes);
        assert_eq!(top_nodes[0].1.word_id, 4);
    }

    #[test]
    fn test_empty() {
        let mut lattice = Lattice::default();
        lattice.reset(0);
        let mut top_nodes = vec![];
        lattice.append_top_nodes(&mut top_nodes);
        assert!(top_nodes.is_empty());
    }
}
