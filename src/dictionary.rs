// Cornerstones – A word search game
// Copyright (C) 2024  Neil Roberts
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! A trie of uppercase words.
//!
//! The word search walks the trie one letter at a time alongside the
//! grid so that it can give up on a route as soon as no word starts
//! with the letters seen so far.

use std::cmp::Ordering;
use std::num::NonZeroUsize;
use std::path::Path;
use super::word_list;

// Marks the end of a word. It sorts before every letter so it is
// always the first child of a node.
const END_OF_WORD: char = '\0';

#[derive(Debug, Clone)]
struct Node {
    letter: char,
    // Index of the first child if there is one
    first_child: Option<NonZeroUsize>,
    // Index of the next sibling if there is one
    next_sibling: Option<NonZeroUsize>,
}

impl Node {
    fn new(letter: char) -> Node {
        Node {
            letter,
            first_child: None,
            next_sibling: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dictionary {
    // The first node is the root and is never anyone’s child so the
    // other indices can never be zero.
    nodes: Vec<Node>,
    n_words: usize,
}

#[derive(Clone, Copy)]
pub struct Walker<'a> {
    dictionary: &'a Dictionary,
    node: usize,
}

impl<'a> Walker<'a> {
    pub fn new(dictionary: &'a Dictionary) -> Option<Walker<'a>> {
        dictionary.nodes[0].first_child.map(|_| Walker {
            dictionary,
            node: 0,
        })
    }

    /// Whether the letters stepped through so far make a whole word
    pub fn is_end(&self) -> bool {
        self.dictionary.nodes[self.node].first_child
            .map(|child| self.dictionary.nodes[child.get()].letter)
            == Some(END_OF_WORD)
    }

    /// Follows the branch for `next`. Returns `None` if no word
    /// continues with that letter.
    pub fn step(&self, next: char) -> Option<Walker<'a>> {
        let nodes = &self.dictionary.nodes;
        let mut child = nodes[self.node].first_child;

        while let Some(index) = child {
            let node = &nodes[index.get()];

            match node.letter.cmp(&next) {
                Ordering::Equal => {
                    // Terminators have no children
                    return (next != END_OF_WORD).then_some(Walker {
                        dictionary: self.dictionary,
                        node: index.get(),
                    });
                },
                // The siblings are sorted so the letter can’t come later
                Ordering::Greater => return None,
                Ordering::Less => child = node.next_sibling,
            }
        }

        None
    }
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary {
            nodes: vec![Node::new('*')],
            n_words: 0,
        }
    }

    pub fn from_words<I, S>(words: I) -> Dictionary
        where I: IntoIterator<Item = S>,
              S: AsRef<str>
    {
        let mut dictionary = Dictionary::new();

        for word in words {
            dictionary.add_word(word.as_ref());
        }

        dictionary
    }

    /// Reads a word list with one word per line. See
    /// [`word_list::read_word_list`] for the rules about which lines
    /// are kept.
    pub fn load<P: AsRef<Path>>(
        filename: P,
    ) -> Result<Dictionary, std::io::Error> {
        let words = word_list::read_word_list(std::iter::once(filename))?;

        Ok(Dictionary::from_words(words))
    }

    // Returns the index of the child with the given letter, adding it
    // in sorted order if it isn’t there yet. The second value is
    // whether the node was added.
    fn find_or_add_child(
        &mut self,
        parent: usize,
        letter: char,
    ) -> (usize, bool) {
        let mut previous = None;
        let mut child = self.nodes[parent].first_child;

        while let Some(index) = child {
            let node = &self.nodes[index.get()];

            match node.letter.cmp(&letter) {
                Ordering::Equal => return (index.get(), false),
                Ordering::Greater => break,
                Ordering::Less => {
                    previous = Some(index.get());
                    child = node.next_sibling;
                },
            }
        }

        let new_node_pos = self.nodes.len();
        let mut new_node = Node::new(letter);
        new_node.next_sibling = child;
        self.nodes.push(new_node);

        // The nodes list is never empty, so the new_node_pos
        // shouldn’t be zero
        let link = NonZeroUsize::new(new_node_pos);
        assert!(link.is_some());

        match previous {
            Some(previous) => self.nodes[previous].next_sibling = link,
            None => self.nodes[parent].first_child = link,
        }

        (new_node_pos, true)
    }

    /// Adds a word, converting it to uppercase first. Returns false if
    /// the word was already present or is empty.
    pub fn add_word(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }

        let mut node = 0;

        for letter in word.chars().map(|ch| ch.to_ascii_uppercase()) {
            node = self.find_or_add_child(node, letter).0;
        }

        let added = self.find_or_add_child(node, END_OF_WORD).1;

        if added {
            self.n_words += 1;
        }

        added
    }

    pub fn contains(&self, word: &str) -> bool {
        let Some(mut walker) = Walker::new(self)
        else {
            return false;
        };

        for letter in word.chars() {
            walker = match walker.step(letter.to_ascii_uppercase()) {
                Some(w) => w,
                None => return false,
            };
        }

        !word.is_empty() && walker.is_end()
    }

    pub fn len(&self) -> usize {
        self.n_words
    }

    pub fn is_empty(&self) -> bool {
        self.n_words == 0
    }

    /// Every word in alphabetical order
    pub fn words(&self) -> Vec<String> {
        let mut words = Vec::with_capacity(self.n_words);
        let mut buf = String::new();
        // Each entry is a node to visit and the length of the word
        // before that node’s letter
        let mut stack = self.nodes[0].first_child
            .map(|child| vec![(child.get(), 0)])
            .unwrap_or_default();

        while let Some((index, word_length)) = stack.pop() {
            let node = &self.nodes[index];

            if let Some(sibling) = node.next_sibling {
                stack.push((sibling.get(), word_length));
            }

            buf.truncate(word_length);

            if node.letter == END_OF_WORD {
                words.push(buf.clone());
            } else {
                buf.push(node.letter);

                if let Some(child) = node.first_child {
                    stack.push((child.get(), buf.len()));
                }
            }
        }

        words
    }

    /// Makes a new dictionary with the given words taken out. The
    /// original is left alone.
    pub fn without<I, S>(&self, removed: I) -> Dictionary
        where I: IntoIterator<Item = S>,
              S: AsRef<str>
    {
        let removed = removed.into_iter()
            .map(|word| word.as_ref().to_ascii_uppercase())
            .collect::<std::collections::HashSet<String>>();

        Dictionary::from_words(
            self.words().into_iter().filter(|word| !removed.contains(word))
        )
    }
}

impl Default for Dictionary {
    fn default() -> Dictionary {
        Dictionary::new()
    }
}
