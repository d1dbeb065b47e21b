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

pub mod adjacency;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod counts;
pub mod definitions;
pub mod dictionary;
pub mod grid;
pub mod logging;
pub mod optimizer;
pub mod puzzle;
pub mod search;
pub mod validator;
pub mod word_finder;
pub mod word_list;
