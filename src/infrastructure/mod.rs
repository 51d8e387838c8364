// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod breach_list;
pub mod input;
pub mod patterns;
pub mod sink;
