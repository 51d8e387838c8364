// Copyright (c) 2025 CredSift Contributors
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod models;
